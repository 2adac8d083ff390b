//! Client tests against a live server

use deliq::{Client, DeliError};

use crate::common::TestServer;

#[test]
fn test_client_full_cycle() {
    let server = TestServer::start();
    let mut client = Client::connect(server.addr).unwrap();

    assert_eq!(client.len("my_queue").unwrap(), 0);

    let id = client.add("my_queue", "Hello, world!", 0).unwrap();
    assert_eq!(client.len("my_queue").unwrap(), 1);

    let (reserved_id, body) = client.reserve("my_queue").unwrap();
    assert_eq!(reserved_id, id);
    assert_eq!(body, "Hello, world!");

    client.done("my_queue", &id).unwrap();
    assert!(matches!(client.done("my_queue", &id), Err(DeliError::NoSuchId)));

    client.close().unwrap();
}

#[test]
fn test_client_typed_errors() {
    let server = TestServer::start();
    let mut client = Client::connect(server.addr).unwrap();

    assert!(matches!(client.reserve("empty"), Err(DeliError::EmptyQueue)));
    assert!(matches!(client.retry("empty", "x"), Err(DeliError::NoSuchId)));

    let id = client.add("q", "once", 0).unwrap();
    client.reserve("q").unwrap();
    assert!(matches!(client.retry("q", &id), Err(DeliError::NoRetriesRemaining)));
}

#[test]
fn test_client_retry_redelivers_first() {
    let server = TestServer::start();
    let mut client = Client::connect(server.addr).unwrap();

    let a = client.add("q", "A", 2).unwrap();
    let b = client.add("q", "B", 2).unwrap();

    assert_eq!(client.reserve("q").unwrap().0, a);
    client.retry("q", &a).unwrap();

    assert_eq!(client.reserve("q").unwrap(), (a, "A".to_string()));
    assert_eq!(client.reserve("q").unwrap(), (b, "B".to_string()));
}


#[test]
fn test_client_rejects_body_with_line_break() {
    let server = TestServer::start();
    let mut client = Client::connect(server.addr).unwrap();

    assert!(matches!(
        client.add("q", "line one\nLEN q", 0),
        Err(DeliError::InvalidArgument(_))
    ));
    assert!(matches!(
        client.add("q", "line one\r\n", 0),
        Err(DeliError::InvalidArgument(_))
    ));

    // Nothing reached the server and replies stay in step
    assert_eq!(client.len("q").unwrap(), 0);
    assert_eq!(client.len("other").unwrap(), 0);
    assert_eq!(server.engine.queue("q").total_len(), 0);
}

#[test]
fn test_client_rejects_queue_name_with_whitespace() {
    let server = TestServer::start();
    let mut client = Client::connect(server.addr).unwrap();

    assert!(matches!(
        client.add("my queue", "body", 0),
        Err(DeliError::InvalidArgument(_))
    ));
    assert!(matches!(client.len("my queue"), Err(DeliError::InvalidArgument(_))));
    assert!(matches!(client.reserve(""), Err(DeliError::InvalidArgument(_))));

    assert!(server.engine.registry().is_empty());
    assert_eq!(client.len("my_queue").unwrap(), 0);
}

#[test]
fn test_client_rejects_bad_ids() {
    let server = TestServer::start();
    let mut client = Client::connect(server.addr).unwrap();

    let id = client.add("q", "job", 1).unwrap();
    client.reserve("q").unwrap();

    for bad in ["", "two words", " "] {
        assert!(matches!(client.retry("q", bad), Err(DeliError::InvalidArgument(_))));
        assert!(matches!(client.done("q", bad), Err(DeliError::InvalidArgument(_))));
    }

    client.done("q", &id).unwrap();
    assert_eq!(client.len("q").unwrap(), 0);
}
