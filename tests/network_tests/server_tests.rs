//! Raw protocol tests against a live server

use std::thread;

use crate::common::{text, RawConn, TestServer};

// =============================================================================
// End-to-End Scenarios
// =============================================================================

#[test]
fn test_add_reserve_done_round() {
    let server = TestServer::start();
    let mut conn = RawConn::connect(server.addr);

    let id = text(&conn.call("ADD q 0 hello"));
    assert!(!id.is_empty());

    assert_eq!(conn.call("LEN q"), ":1\r\n");
    assert_eq!(conn.call("RESERVE q"), format!("+{} hello\r\n", id));
    assert_eq!(conn.call("LEN q"), ":0\r\n");
    assert_eq!(conn.call(&format!("DONE q {}", id)), "+OK\r\n");
    assert_eq!(conn.call(&format!("DONE q {}", id)), "-ERR No such Id.\r\n");
}

#[test]
fn test_retry_round() {
    let server = TestServer::start();
    let mut conn = RawConn::connect(server.addr);

    let id = text(&conn.call("ADD q 1 msg"));

    assert_eq!(conn.call("RESERVE q"), format!("+{} msg\r\n", id));
    assert_eq!(conn.call(&format!("RETRY q {}", id)), "+OK\r\n");
    assert_eq!(conn.call("RESERVE q"), format!("+{} msg\r\n", id));
    assert_eq!(
        conn.call(&format!("RETRY q {}", id)),
        "-ERR No retries remaining.\r\n"
    );
    assert_eq!(conn.call("LEN q"), ":0\r\n");
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_errors_keep_connection_open() {
    let server = TestServer::start();
    let mut conn = RawConn::connect(server.addr);

    assert_eq!(conn.call("RESERVE empty"), "-ERR No items available to reserve.\r\n");
    assert_eq!(conn.call("ADD q"), "-ERR Missing ADD parameters.\r\n");
    assert_eq!(conn.call("ADD q lots body"), "-ERR Invalid number of retries.\r\n");
    assert_eq!(conn.call("LEN"), "-ERR Missing LEN parameters.\r\n");
    assert_eq!(conn.call("RETRY q nope"), "-ERR No such Id.\r\n");
    assert_eq!(conn.call("PING"), "-ERR Unrecognized command.\r\n");
    assert_eq!(conn.call(""), "-ERR Unrecognized command.\r\n");

    // Still usable afterwards
    assert_eq!(conn.call("LEN q"), ":0\r\n");
}

#[test]
fn test_body_with_spaces_round_trips() {
    let server = TestServer::start();
    let mut conn = RawConn::connect(server.addr);

    let id = text(&conn.call("ADD jobs 2 resize image 42 to 640x480"));
    assert_eq!(
        conn.call("RESERVE jobs"),
        format!("+{} resize image 42 to 640x480\r\n", id)
    );
}

#[test]
fn test_close_ends_connection_without_reply() {
    let server = TestServer::start();
    let mut conn = RawConn::connect(server.addr);

    assert_eq!(conn.call("LEN q"), ":0\r\n");
    conn.send("CLOSE");
    assert!(conn.is_closed());
}

// =============================================================================
// Shared State Tests
// =============================================================================

#[test]
fn test_queues_shared_across_connections() {
    let server = TestServer::start();
    let mut producer = RawConn::connect(server.addr);
    let mut consumer = RawConn::connect(server.addr);

    let id = text(&producer.call("ADD shared 0 work"));

    assert_eq!(consumer.call("LEN shared"), ":1\r\n");
    assert_eq!(consumer.call("RESERVE shared"), format!("+{} work\r\n", id));
    assert_eq!(producer.call("LEN shared"), ":0\r\n");
    assert_eq!(producer.call(&format!("DONE shared {}", id)), "+OK\r\n");

    assert_eq!(server.engine.queue("shared").total_len(), 0);
}

#[test]
fn test_reserved_item_stays_reserved_after_disconnect() {
    let server = TestServer::start();

    {
        let mut conn = RawConn::connect(server.addr);
        text(&conn.call("ADD q 3 stranded"));
        text(&conn.call("RESERVE q"));
    }

    let mut conn = RawConn::connect(server.addr);
    assert_eq!(conn.call("LEN q"), ":0\r\n");
    assert_eq!(conn.call("RESERVE q"), "-ERR No items available to reserve.\r\n");
}

#[test]
fn test_parallel_consumers_never_share_an_item() {
    let server = TestServer::start();
    let k = 60;

    let mut producer = RawConn::connect(server.addr);
    for i in 0..k {
        text(&producer.call(&format!("ADD work 0 job {}", i)));
    }

    let addr = server.addr;
    let handles: Vec<_> = (0..6)
        .map(|_| {
            thread::spawn(move || {
                let mut conn = RawConn::connect(addr);
                let mut ids = Vec::new();
                loop {
                    let response = conn.call("RESERVE work");
                    if response.starts_with('-') {
                        assert_eq!(response, "-ERR No items available to reserve.\r\n");
                        break;
                    }
                    let reply = text(&response);
                    let (id, _) = reply.split_once(' ').unwrap();
                    ids.push(id.to_string());
                }
                ids
            })
        })
        .collect();

    let mut all: Vec<String> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    let total = all.len();
    all.sort();
    all.dedup();

    assert_eq!(total, k);
    assert_eq!(all.len(), k);
}
