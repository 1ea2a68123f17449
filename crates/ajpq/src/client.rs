//! Synchronous AJP client and the request-executor seam.
//!
//! The CLI dispatches into [`RequestExecutor`]; [`AjpClient`] is the
//! production implementation that owns the TCP connection and the packet
//! exchange. One invocation performs one blocking exchange.

use crate::error::AjpError;
use crate::request::{
    ForwardRequest, HeaderName, HeaderSet, RequestAttribute, RequestBody, Target,
};
use crate::response::AjpResponse;
use crate::types::{self, AjpMethod, AjpRequestHeader};
use crate::wire;
use log::{debug, info};
use std::io::{BufReader, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Construction-time executor configuration. Wire tracing is an explicit
/// field here, not process-global logger state.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub connect_timeout: Option<Duration>,
    pub io_timeout: Option<Duration>,
    /// Log sent and received frames at debug level.
    pub verbose: bool,
}

/// One operation per supported method. Bodyless methods forward the target,
/// headers, and attributes; POST and PUT additionally forward the body.
pub trait RequestExecutor {
    fn get(
        &mut self,
        target: &Target,
        headers: HeaderSet,
        attributes: Vec<RequestAttribute>,
    ) -> Result<AjpResponse, AjpError>;

    fn head(
        &mut self,
        target: &Target,
        headers: HeaderSet,
        attributes: Vec<RequestAttribute>,
    ) -> Result<AjpResponse, AjpError>;

    fn options(
        &mut self,
        target: &Target,
        headers: HeaderSet,
        attributes: Vec<RequestAttribute>,
    ) -> Result<AjpResponse, AjpError>;

    fn delete(
        &mut self,
        target: &Target,
        headers: HeaderSet,
        attributes: Vec<RequestAttribute>,
    ) -> Result<AjpResponse, AjpError>;

    fn copy(
        &mut self,
        target: &Target,
        headers: HeaderSet,
        attributes: Vec<RequestAttribute>,
    ) -> Result<AjpResponse, AjpError>;

    fn post(
        &mut self,
        target: &Target,
        headers: HeaderSet,
        attributes: Vec<RequestAttribute>,
        body: Option<&RequestBody>,
    ) -> Result<AjpResponse, AjpError>;

    fn put(
        &mut self,
        target: &Target,
        headers: HeaderSet,
        attributes: Vec<RequestAttribute>,
        body: Option<&RequestBody>,
    ) -> Result<AjpResponse, AjpError>;
}

pub struct AjpClient {
    config: ClientConfig,
}

impl AjpClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    fn connect(&self, target: &Target) -> Result<TcpStream, AjpError> {
        let addr = target.authority();
        let stream = match self.config.connect_timeout {
            Some(timeout) => {
                let resolved = (target.host.as_str(), target.port)
                    .to_socket_addrs()
                    .map_err(|e| AjpError::Connect {
                        addr: addr.clone(),
                        details: e.to_string(),
                    })?;
                let mut last_error = None;
                let mut connected = None;
                for candidate in resolved {
                    match TcpStream::connect_timeout(&candidate, timeout) {
                        Ok(s) => {
                            connected = Some(s);
                            break;
                        }
                        Err(e) => last_error = Some(e),
                    }
                }
                connected.ok_or_else(|| AjpError::Connect {
                    addr: addr.clone(),
                    details: last_error
                        .map(|e| e.to_string())
                        .unwrap_or_else(|| "no addresses resolved".to_string()),
                })?
            }
            None => TcpStream::connect((target.host.as_str(), target.port)).map_err(|e| {
                AjpError::Connect {
                    addr: addr.clone(),
                    details: e.to_string(),
                }
            })?,
        };

        stream
            .set_read_timeout(self.config.io_timeout)
            .and_then(|()| stream.set_write_timeout(self.config.io_timeout))
            .map_err(|e| AjpError::from_io_error(e, "configuring socket timeouts"))?;

        info!("connected to {addr}");
        Ok(stream)
    }

    fn exchange(
        &mut self,
        method: AjpMethod,
        target: &Target,
        mut headers: HeaderSet,
        mut attributes: Vec<RequestAttribute>,
        body: Option<&RequestBody>,
    ) -> Result<AjpResponse, AjpError> {
        let stream = self.connect(target)?;

        // Content-Length (and a default Content-Type) are obligations of the
        // body transfer, so they are set here rather than by the builders.
        let body_bytes = match body {
            Some(b) => {
                let bytes = b.to_bytes()?;
                let content_type = HeaderName::Known(AjpRequestHeader::ContentType);
                if !headers.contains(&content_type) {
                    headers.insert(content_type, b.content_type().to_string());
                }
                headers.insert(
                    HeaderName::Known(AjpRequestHeader::ContentLength),
                    bytes.len().to_string(),
                );
                Some(bytes)
            }
            None => None,
        };

        // The container learns the peer's identity from request attributes.
        if let Ok(local) = stream.local_addr() {
            attributes.push(RequestAttribute::named(
                "AJP_REMOTE_PORT",
                local.port().to_string(),
            ));
            attributes.push(RequestAttribute::named(
                "AJP_LOCAL_ADDR",
                local.ip().to_string(),
            ));
        }

        let request = ForwardRequest {
            method,
            protocol: "HTTP/1.1".to_string(),
            req_uri: target.path.clone(),
            remote_addr: stream.local_addr().ok().map(|a| a.ip().to_string()),
            remote_host: Some(target.host.clone()),
            server_name: target.host.clone(),
            server_port: target.port,
            is_ssl: false,
            headers,
            attributes,
        };

        self.send_and_receive(stream, request, body_bytes)
    }

    fn send_and_receive(
        &self,
        stream: TcpStream,
        request: ForwardRequest,
        body: Option<Vec<u8>>,
    ) -> Result<AjpResponse, AjpError> {
        let mut writer = stream
            .try_clone()
            .map_err(|e| AjpError::from_io_error(e, "cloning connection handle"))?;
        let mut reader = BufReader::new(stream);

        let packet = request.to_packet();
        if self.config.verbose {
            debug!(
                "-> {} {} ({} byte forward request)",
                request.method,
                request.req_uri,
                packet.len()
            );
        }
        writer
            .write_all(&packet)
            .map_err(|e| AjpError::from_io_error(e, "sending forward request"))?;

        // The first body chunk rides directly behind the forward request;
        // the container pulls the rest with GET_BODY_CHUNK.
        let mut remaining: &[u8] = body.as_deref().unwrap_or(&[]);
        if !remaining.is_empty() {
            let n = remaining.len().min(wire::MAX_BODY_CHUNK);
            if self.config.verbose {
                debug!("-> body chunk ({n} bytes)");
            }
            writer
                .write_all(&wire::body_chunk(&remaining[..n]))
                .map_err(|e| AjpError::from_io_error(e, "sending body chunk"))?;
            remaining = &remaining[n..];
        }

        let mut status: Option<(u16, String, Vec<(String, String)>)> = None;
        let mut body_out: Vec<u8> = Vec::new();

        loop {
            let payload_len = wire::read_server_frame_header(&mut reader)? as usize;
            let prefix = wire::read_u8(&mut reader, "reading packet prefix")?;
            match prefix {
                wire::SEND_HEADERS => {
                    let parsed = Self::read_headers_payload(&mut reader)?;
                    if self.config.verbose {
                        debug!("<- headers, status {}", parsed.0);
                    }
                    status = Some(parsed);
                }
                wire::SEND_BODY_CHUNK => {
                    let n = wire::read_u16(&mut reader, "reading body chunk length")? as usize;
                    let data = wire::read_bytes(&mut reader, n, "reading body chunk")?;
                    if self.config.verbose {
                        debug!("<- body chunk ({n} bytes)");
                    }
                    body_out.extend_from_slice(&data);
                    // Some containers pad the chunk; drain to the declared
                    // payload length.
                    let leftover = payload_len.saturating_sub(3 + n);
                    if leftover > 0 {
                        wire::read_bytes(&mut reader, leftover, "discarding chunk padding")?;
                    }
                }
                wire::GET_BODY_CHUNK => {
                    let requested =
                        wire::read_u16(&mut reader, "reading requested chunk size")? as usize;
                    let n = remaining.len().min(requested).min(wire::MAX_BODY_CHUNK);
                    if self.config.verbose {
                        debug!("<- get body chunk, sending {n} bytes");
                    }
                    writer
                        .write_all(&wire::body_chunk(&remaining[..n]))
                        .map_err(|e| AjpError::from_io_error(e, "sending body chunk"))?;
                    remaining = &remaining[n..];
                }
                wire::END_RESPONSE => {
                    let _reuse = wire::read_u8(&mut reader, "reading reuse flag")?;
                    if self.config.verbose {
                        debug!("<- end response");
                    }
                    break;
                }
                other => {
                    return Err(AjpError::protocol(format!(
                        "unexpected packet prefix 0x{other:02x}"
                    )));
                }
            }
        }

        let (status_code, status_msg, headers) = status.ok_or_else(|| {
            AjpError::protocol("container ended the response without sending headers")
        })?;

        Ok(AjpResponse {
            request,
            status_code,
            status_msg,
            headers,
            body: body_out,
        })
    }

    fn read_headers_payload(
        reader: &mut impl Read,
    ) -> Result<(u16, String, Vec<(String, String)>), AjpError> {
        let status_code = wire::read_u16(reader, "reading status code")?;
        let raw_msg = wire::read_string(reader, "reading status message")?.unwrap_or_default();
        let count = wire::read_u16(reader, "reading header count")? as usize;

        let mut headers = Vec::with_capacity(count);
        for _ in 0..count {
            let first = wire::read_u16(reader, "reading header name")?;
            let name = match types::response_header_name(first) {
                Some(known) => known.to_string(),
                // Below the coded range the value is the literal name length.
                None if first < 0xA000 => {
                    wire::read_string_of_len(reader, first as usize, "reading header name")?
                }
                None => {
                    return Err(AjpError::protocol(format!(
                        "unknown response header code 0x{first:04x}"
                    )));
                }
            };
            let value = wire::read_string(reader, "reading header value")?.unwrap_or_default();
            headers.push((name, value));
        }

        // Containers sometimes echo the numeric code as the message.
        let status_msg = if raw_msg == status_code.to_string() {
            types::status_description(status_code).to_string()
        } else {
            raw_msg
        };

        Ok((status_code, status_msg, headers))
    }
}

impl RequestExecutor for AjpClient {
    fn get(
        &mut self,
        target: &Target,
        headers: HeaderSet,
        attributes: Vec<RequestAttribute>,
    ) -> Result<AjpResponse, AjpError> {
        self.exchange(AjpMethod::Get, target, headers, attributes, None)
    }

    fn head(
        &mut self,
        target: &Target,
        headers: HeaderSet,
        attributes: Vec<RequestAttribute>,
    ) -> Result<AjpResponse, AjpError> {
        self.exchange(AjpMethod::Head, target, headers, attributes, None)
    }

    fn options(
        &mut self,
        target: &Target,
        headers: HeaderSet,
        attributes: Vec<RequestAttribute>,
    ) -> Result<AjpResponse, AjpError> {
        self.exchange(AjpMethod::Options, target, headers, attributes, None)
    }

    fn delete(
        &mut self,
        target: &Target,
        headers: HeaderSet,
        attributes: Vec<RequestAttribute>,
    ) -> Result<AjpResponse, AjpError> {
        self.exchange(AjpMethod::Delete, target, headers, attributes, None)
    }

    fn copy(
        &mut self,
        target: &Target,
        headers: HeaderSet,
        attributes: Vec<RequestAttribute>,
    ) -> Result<AjpResponse, AjpError> {
        self.exchange(AjpMethod::Copy, target, headers, attributes, None)
    }

    fn post(
        &mut self,
        target: &Target,
        headers: HeaderSet,
        attributes: Vec<RequestAttribute>,
        body: Option<&RequestBody>,
    ) -> Result<AjpResponse, AjpError> {
        self.exchange(AjpMethod::Post, target, headers, attributes, body)
    }

    fn put(
        &mut self,
        target: &Target,
        headers: HeaderSet,
        attributes: Vec<RequestAttribute>,
        body: Option<&RequestBody>,
    ) -> Result<AjpResponse, AjpError> {
        self.exchange(AjpMethod::Put, target, headers, attributes, body)
    }
}
