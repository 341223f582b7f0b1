//! Walks through the main server operations: ingest, ranked search, matching,
//! removal, duplicate cleanup, batch queries, request statistics, and
//! pagination.

use rankdex::batch::processor::process_queries;
use rankdex::core::config::Config;
use rankdex::maintenance::duplicates::remove_duplicates;
use rankdex::maintenance::paginator::paginate;
use rankdex::maintenance::request_queue::RequestQueue;
use rankdex::{DocumentStatus, Server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building server with stop-words \"and of a\"...");
    let server = Server::with_stop_words_text(Config::default(), "and of a")?;

    println!("Adding documents...");
    server.add_document(1, "cat in the city", DocumentStatus::Actual, &[-1, 2, 2])?;
    server.add_document(2, "dog of a hidden village", DocumentStatus::Actual, &[1, 2, 3])?;
    server.add_document(3, "curious cat and a village dog", DocumentStatus::Actual, &[4, 5])?;
    println!("  {} documents in the store\n", server.document_count());

    println!("Searching for \"cat -hidden\"...");
    for doc in server.find_top_documents_default("cat -hidden")? {
        println!("  id={} relevance={:.6} rating={}", doc.id, doc.relevance, doc.rating);
    }
    println!();

    println!("Matching document 3 against \"cat village\"...");
    let (words, status) = server.match_document("cat village", 3)?;
    println!("  matched words: {words:?}, status: {status:?}\n");

    println!("Removing document 2...");
    server.remove_document(2);
    println!("  {} documents remain\n", server.document_count());

    server.add_document(4, "cat in the city", DocumentStatus::Actual, &[-1, 2, 2])?;
    println!("Running duplicate removal...");
    let removed = remove_duplicates(&server);
    println!("  removed ids: {removed:?}\n");

    process_queries_demo(&server);
    request_queue_demo(&server);
    paginate_demo();

    Ok(())
}

fn process_queries_demo(server: &Server) {
    println!("Running a batch of queries in parallel...");
    let queries = ["cat", "village", "-cat dog"].map(String::from);
    for (query, result) in queries.iter().zip(process_queries(server, &queries)) {
        match result {
            Ok(docs) => println!("  {query:?} -> {} hit(s)", docs.len()),
            Err(err) => println!("  {query:?} -> error: {err}"),
        }
    }
    println!();
}

fn request_queue_demo(server: &Server) {
    println!("Tracking no-result requests over a sliding window...");
    let mut queue = RequestQueue::new(server);
    for query in ["cat", "dragon", "village"] {
        let _ = queue.add_find_request_default(query);
    }
    println!("  no-result requests so far: {}\n", queue.no_result_requests());
}

fn paginate_demo() {
    println!("Paginating 23 ids into pages of 10...");
    let ids: Vec<i64> = (0..23).collect();
    for page in paginate(&ids, 10) {
        println!("  page: {page:?}");
    }
}
