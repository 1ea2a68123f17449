//! Executor tests against a canned-frame TCP fixture.

use ajpq::{
    AjpClient, AjpError, AjpRequestHeader, ClientConfig, HeaderName, HeaderSet, RequestAttribute,
    RequestBody, RequestExecutor, Target, wire,
};
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

fn server_frame(payload: &[u8]) -> Vec<u8> {
    let mut packet = vec![b'A', b'B'];
    wire::put_u16(&mut packet, payload.len() as u16);
    packet.extend_from_slice(payload);
    packet
}

fn send_headers_frame(status: u16, msg: &str, headers: &[(HeaderKey, &str)]) -> Vec<u8> {
    let mut payload = vec![wire::SEND_HEADERS];
    wire::put_u16(&mut payload, status);
    wire::put_string(&mut payload, Some(msg));
    wire::put_u16(&mut payload, headers.len() as u16);
    for (key, value) in headers {
        match key {
            HeaderKey::Literal(name) => wire::put_string(&mut payload, Some(*name)),
            HeaderKey::Coded(code) => wire::put_u16(&mut payload, *code),
        }
        wire::put_string(&mut payload, Some(*value));
    }
    server_frame(&payload)
}

enum HeaderKey {
    Literal(&'static str),
    Coded(u16),
}

fn body_chunk_frame(data: &[u8]) -> Vec<u8> {
    let mut payload = vec![wire::SEND_BODY_CHUNK];
    wire::put_u16(&mut payload, data.len() as u16);
    payload.extend_from_slice(data);
    // Containers terminate the chunk with a stray NUL not counted in the
    // length; the client must drain it.
    payload.push(0);
    server_frame(&payload)
}

fn get_body_chunk_frame(requested: u16) -> Vec<u8> {
    let mut payload = vec![wire::GET_BODY_CHUNK];
    wire::put_u16(&mut payload, requested);
    server_frame(&payload)
}

fn end_response_frame() -> Vec<u8> {
    server_frame(&[wire::END_RESPONSE, 0x01])
}

fn read_client_packet(stream: &mut TcpStream) -> Vec<u8> {
    let mut header = [0u8; 4];
    stream.read_exact(&mut header).unwrap();
    assert_eq!(&header[..2], &[0x12, 0x34], "client packet magic");
    let len = u16::from_be_bytes([header[2], header[3]]) as usize;
    let mut payload = vec![0u8; len];
    stream.read_exact(&mut payload).unwrap();
    payload
}

fn target(port: u16) -> Target {
    Target {
        host: "127.0.0.1".to_string(),
        port,
        path: "/docs".to_string(),
    }
}

#[test]
fn get_exchange_parses_status_headers_and_chunked_body() {
    // Setup
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_client_packet(&mut stream);
        assert_eq!(request[0], wire::FORWARD_REQUEST);
        assert_eq!(request[1], 0x02, "GET method code");

        stream
            .write_all(&send_headers_frame(
                200,
                "OK",
                &[
                    (HeaderKey::Coded(0xA001), "text/plain"),
                    (HeaderKey::Literal("X-Powered-By"), "fixture"),
                ],
            ))
            .unwrap();
        stream.write_all(&body_chunk_frame(b"hel")).unwrap();
        stream.write_all(&body_chunk_frame(b"lo")).unwrap();
        stream.write_all(&end_response_frame()).unwrap();
        request
    });

    // Action
    let mut client = AjpClient::new(ClientConfig::default());
    let response = client
        .get(&target(port), HeaderSet::new(), Vec::new())
        .unwrap();

    // Expectation
    assert_eq!(response.status_code, 200);
    assert_eq!(response.status_msg, "OK");
    assert_eq!(
        response.headers,
        vec![
            ("Content-Type".to_string(), "text/plain".to_string()),
            ("X-Powered-By".to_string(), "fixture".to_string()),
        ]
    );
    assert_eq!(response.text(), "hello");

    // The executor stamps the local socket identity onto the attributes
    assert!(response.request.attributes.iter().any(
        |a| matches!(a, RequestAttribute::Named { name, .. } if name == "AJP_REMOTE_PORT")
    ));
    assert!(response.request.attributes.iter().any(
        |a| matches!(a, RequestAttribute::Named { name, .. } if name == "AJP_LOCAL_ADDR")
    ));

    let request = server.join().unwrap();
    assert_eq!(*request.last().unwrap(), 0xFF, "attribute terminator");
}

#[test]
fn numeric_status_message_is_replaced_with_the_description() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        read_client_packet(&mut stream);
        stream
            .write_all(&send_headers_frame(404, "404", &[]))
            .unwrap();
        stream.write_all(&end_response_frame()).unwrap();
    });

    let mut client = AjpClient::new(ClientConfig::default());
    let response = client
        .get(&target(port), HeaderSet::new(), Vec::new())
        .unwrap();

    assert_eq!(response.status_code, 404);
    assert_eq!(response.status_msg, "Not Found");
    server.join().unwrap();
}

#[test]
fn post_sends_the_body_and_answers_get_body_chunk() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_client_packet(&mut stream);
        assert_eq!(request[1], 0x04, "POST method code");

        // First body chunk rides behind the forward request
        let chunk = read_client_packet(&mut stream);
        assert_eq!(&chunk[..2], &7u16.to_be_bytes());
        assert_eq!(&chunk[2..], b"a=1&b=2");

        // Ask for more; the body is exhausted so an empty chunk comes back
        stream.write_all(&get_body_chunk_frame(8192)).unwrap();
        let empty = read_client_packet(&mut stream);
        assert!(empty.is_empty());

        stream
            .write_all(&send_headers_frame(201, "Created", &[]))
            .unwrap();
        stream.write_all(&end_response_frame()).unwrap();
    });

    let mut client = AjpClient::new(ClientConfig::default());
    let body = RequestBody::Form("a=1&b=2".to_string());
    let response = client
        .post(&target(port), HeaderSet::new(), Vec::new(), Some(&body))
        .unwrap();

    assert_eq!(response.status_code, 201);
    // The executor owns the body's wire headers
    assert_eq!(
        response
            .request
            .headers
            .get(&HeaderName::Known(AjpRequestHeader::ContentLength)),
        Some("7")
    );
    assert_eq!(
        response
            .request
            .headers
            .get(&HeaderName::Known(AjpRequestHeader::ContentType)),
        Some("application/x-www-form-urlencoded")
    );
    server.join().unwrap();
}

#[test]
fn connection_refused_maps_to_a_connect_error() {
    // Bind and immediately drop to get a port with nothing listening
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let mut client = AjpClient::new(ClientConfig::default());
    let result = client.get(&target(port), HeaderSet::new(), Vec::new());

    assert!(matches!(result, Err(AjpError::Connect { .. })));
}

#[test]
fn truncated_response_surfaces_as_a_protocol_or_io_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        read_client_packet(&mut stream);
        // Close without sending END_RESPONSE
        stream
            .write_all(&send_headers_frame(200, "OK", &[]))
            .unwrap();
    });

    let mut client = AjpClient::new(ClientConfig::default());
    let result = client.get(&target(port), HeaderSet::new(), Vec::new());

    assert!(matches!(
        result,
        Err(AjpError::Io { .. }) | Err(AjpError::Protocol { .. })
    ));
    server.join().unwrap();
}
