use rayon::prelude::*;

use crate::core::error::Result;
use crate::core::types::Document;
use crate::server::Server;

/// Runs one `find_top_documents` per query, fanned out over `rayon`, aligned
/// by index with `queries`. A malformed query (`INVALID_QUERY`) surfaces as
/// an `Err` at its position rather than being swallowed into an empty match.
/// Ported from `process_queries.cpp`'s `std::transform(std::execution::par,
/// ...)`.
pub fn process_queries(server: &Server, queries: &[String]) -> Vec<Result<Vec<Document>>> {
    queries.par_iter().map(|query| server.find_top_documents_default(query)).collect()
}

/// Flattens `process_queries`'s per-query result lists into a single vector,
/// preserving query order. Fails on the first query that failed to parse.
pub fn process_queries_joined(server: &Server, queries: &[String]) -> Result<Vec<Document>> {
    let mut joined = Vec::new();
    for result in process_queries(server, queries) {
        joined.extend(result?);
    }
    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::core::error::ErrorKind;
    use crate::core::types::DocumentStatus;

    #[test]
    fn joined_results_preserve_query_order() {
        let server = Server::new(Config::default(), &[] as &[&str]).unwrap();
        server.add_document(1, "cat city", DocumentStatus::Actual, &[5]).unwrap();
        server.add_document(2, "dog city", DocumentStatus::Actual, &[3]).unwrap();

        let queries = vec!["cat".to_string(), "dog".to_string()];
        let per_query = process_queries(&server, &queries);
        assert_eq!(per_query.len(), 2);
        assert_eq!(per_query[0].as_ref().unwrap()[0].id, 1);
        assert_eq!(per_query[1].as_ref().unwrap()[0].id, 2);

        let joined = process_queries_joined(&server, &queries).unwrap();
        assert_eq!(joined.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn a_malformed_query_surfaces_as_an_error_instead_of_an_empty_match() {
        let server = Server::new(Config::default(), &[] as &[&str]).unwrap();
        server.add_document(1, "cat city", DocumentStatus::Actual, &[5]).unwrap();

        let queries = vec!["cat".to_string(), "--bad".to_string()];
        let per_query = process_queries(&server, &queries);
        assert!(per_query[0].is_ok());
        assert_eq!(per_query[1].as_ref().unwrap_err().kind, ErrorKind::LeadingDoubleMinus);

        let err = process_queries_joined(&server, &queries).unwrap_err();
        assert_eq!(err.kind, ErrorKind::LeadingDoubleMinus);
    }
}
