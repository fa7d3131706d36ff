//! Streaming chat response decoding.
//!
//! Chat responses in streaming mode arrive as a line-oriented sequence of
//! frames over the HTTP response body:
//!
//! ```text
//! event: chunk
//! data: {"message":"Hel"}
//! event: result
//! data: {"bot":{"text":"Hello"},"history":[]}
//! ```
//!
//! Network chunks carry no alignment guarantees: a chunk boundary can fall
//! in the middle of a frame, a line, or even a single multi-byte character.
//! Decoding therefore keeps two pieces of state per stream: a trailing
//! partial byte sequence ([`ChunkDecoder`]) and the unparsed text tail
//! ([`FrameParser`]). Both are owned by one [`ChatStream`] and discarded
//! with it.
//!
//! Frames are yielded strictly in arrival order. The `result` frame is
//! terminal: its payload is yielded like any other and the stream then ends,
//! dropping the response body even if more bytes are buffered on the wire.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{Stream, StreamExt, TryStreamExt};
use serde_json::Value;

use crate::error::{Error, Result};

/// Event type that terminates a chat stream.
const RESULT_EVENT: &str = "result";

/// One decoded frame of the streaming wire format.
#[derive(Debug, Clone, PartialEq)]
pub struct EventFrame {
    /// Event type from the `event:` line.
    pub event: String,
    /// Parsed JSON payload from the `data:` line.
    pub data: Value,
}

impl EventFrame {
    /// Whether this frame terminates the stream.
    pub fn is_result(&self) -> bool {
        self.event == RESULT_EVENT
    }
}

/// Incremental UTF-8 decoder.
///
/// Byte chunks are decoded as they arrive; a multi-byte character split
/// across two chunks is reassembled by carrying the incomplete trailing
/// sequence into the next call. Invalid bytes are replaced with U+FFFD
/// rather than failing the stream.
#[derive(Debug, Default)]
struct ChunkDecoder {
    /// Incomplete trailing byte sequence from the previous chunk (at most
    /// three bytes).
    carry: Vec<u8>,
}

impl ChunkDecoder {
    /// Decode the next chunk, including any bytes carried over.
    fn decode(&mut self, chunk: &[u8]) -> String {
        let mut buf = std::mem::take(&mut self.carry);
        buf.extend_from_slice(chunk);

        let mut out = String::with_capacity(buf.len());
        let mut input = buf.as_slice();
        loop {
            match std::str::from_utf8(input) {
                Ok(text) => {
                    out.push_str(text);
                    input = &[];
                    break;
                }
                Err(err) => {
                    let (valid, rest) = input.split_at(err.valid_up_to());
                    out.push_str(&String::from_utf8_lossy(valid));
                    match err.error_len() {
                        // Truly invalid bytes: substitute and keep going.
                        Some(skip) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            input = &rest[skip..];
                        }
                        // Incomplete sequence at the end of the chunk.
                        None => {
                            input = rest;
                            break;
                        }
                    }
                }
            }
        }
        self.carry = input.to_vec();
        out
    }
}

/// Extracts complete `event:` / `data:` frame pairs from decoded text.
///
/// Text accumulates across calls; a frame is only produced once both of its
/// lines are fully present, so a chunk boundary inside a frame never loses
/// or corrupts it. Both `\n` and `\r\n` line endings are accepted.
#[derive(Debug, Default)]
struct FrameParser {
    /// Accumulated text not yet consumed as complete lines.
    buf: String,
    /// Event type waiting for its `data:` line.
    pending_event: Option<String>,
}

impl FrameParser {
    /// Append decoded text to the parse buffer.
    fn push(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    /// Extract the next complete frame, if one is available.
    ///
    /// Returns `Ok(None)` when more input is needed. A `data:` payload that
    /// is not valid JSON is a protocol error.
    fn next_frame(&mut self) -> Result<Option<EventFrame>> {
        while let Some(newline) = self.buf.find('\n') {
            let line = self.buf[..newline].trim_end_matches('\r').to_string();
            self.buf.drain(..=newline);

            if let Some(event) = line.strip_prefix("event:") {
                self.pending_event = Some(event.trim().to_string());
            } else if let Some(data) = line.strip_prefix("data:") {
                if let Some(event) = self.pending_event.take() {
                    let data =
                        serde_json::from_str(data.trim()).map_err(Error::MalformedFrame)?;
                    return Ok(Some(EventFrame { event, data }));
                }
                // data line with no preceding event line; skip it
            } else {
                // any other line breaks an event/data pair
                self.pending_event = None;
            }
        }
        Ok(None)
    }
}

/// Boxed byte-chunk source backing a stream.
pub(crate) type BodyStream = BoxStream<'static, Result<Bytes>>;

/// Lazy stream of [`EventFrame`]s decoded from a byte-chunk source.
///
/// One chunk is pulled per wakeup at most; decode and parse work between
/// pulls is synchronous, so frames come out in strict arrival order. The
/// underlying reader is dropped exactly once: on end of input, on error, on
/// [`release`](Self::release), or when the stream itself is dropped.
struct FrameStream<S> {
    /// Byte source; `None` once released.
    reader: Option<S>,
    decoder: ChunkDecoder,
    parser: FrameParser,
}

impl<S> FrameStream<S> {
    fn new(reader: S) -> Self {
        Self {
            reader: Some(reader),
            decoder: ChunkDecoder::default(),
            parser: FrameParser::default(),
        }
    }

    /// Drop the underlying reader without waiting for end of input.
    fn release(&mut self) {
        self.reader = None;
    }
}

impl<S> Stream for FrameStream<S>
where
    S: Stream<Item = Result<Bytes>> + Unpin,
{
    type Item = Result<EventFrame>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match this.parser.next_frame() {
                Ok(Some(frame)) => return Poll::Ready(Some(Ok(frame))),
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(error = %err, "undecodable frame payload in chat stream");
                    this.reader = None;
                    return Poll::Ready(Some(Err(err)));
                }
            }

            let Some(reader) = this.reader.as_mut() else {
                return Poll::Ready(None);
            };
            match Pin::new(reader).poll_next(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(Ok(chunk))) => {
                    let text = this.decoder.decode(&chunk);
                    this.parser.push(&text);
                }
                Poll::Ready(Some(Err(err))) => {
                    this.reader = None;
                    return Poll::Ready(Some(Err(err)));
                }
                Poll::Ready(None) => {
                    // End of input. A truncated trailing frame is dropped
                    // rather than reported.
                    this.reader = None;
                    return Poll::Ready(None);
                }
            }
        }
    }
}

/// Lazy stream of chat messages from a streaming chat response.
///
/// Each frame's payload is yielded as a [`serde_json::Value`]; intermediate
/// payload shapes are controlled by the server, and the `result` frame
/// carries the final [`ChatResponse`](crate::types::ChatResponse). The
/// `result` payload is yielded like any other message and the stream then
/// terminates, closing the response body. If the server never sends a
/// `result` frame the stream simply ends at end of input.
///
/// Stopping early is the supported way to cancel: dropping the stream drops
/// the response body and with it the connection's read half.
///
/// # Example
///
/// ```no_run
/// use futures::StreamExt;
///
/// # async fn example() -> dialoqbase_client::Result<()> {
/// # let client = dialoqbase_client::DialoqbaseClient::builder()
/// #     .base_url("http://localhost:3000")
/// #     .api_key("db_...")
/// #     .build()?;
/// let mut stream = client
///     .chat()
///     .stream_message("bot-id", "Hello, tell me a joke")
///     .await?;
/// while let Some(message) = stream.next().await {
///     println!("{}", message?);
/// }
/// # Ok(())
/// # }
/// ```
pub struct ChatStream {
    frames: FrameStream<BodyStream>,
    done: bool,
}

impl std::fmt::Debug for ChatStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatStream")
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl ChatStream {
    /// Decode a successful streaming response.
    pub(crate) fn new(response: reqwest::Response) -> Self {
        let body = response
            .bytes_stream()
            .map_err(|err| Error::Stream(err.to_string()))
            .boxed();
        Self::from_body(body)
    }

    /// Build a stream over an arbitrary byte-chunk source.
    pub(crate) fn from_body(body: BodyStream) -> Self {
        Self {
            frames: FrameStream::new(body),
            done: false,
        }
    }
}

impl Stream for ChatStream {
    type Item = Result<Value>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.done {
            return Poll::Ready(None);
        }
        match Pin::new(&mut this.frames).poll_next(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(None) => {
                this.done = true;
                Poll::Ready(None)
            }
            Poll::Ready(Some(Err(err))) => {
                this.done = true;
                Poll::Ready(Some(Err(err)))
            }
            Poll::Ready(Some(Ok(frame))) => {
                if frame.is_result() {
                    // Terminal frame: close the body now, not when the
                    // consumer happens to drop the stream.
                    this.done = true;
                    this.frames.release();
                }
                Poll::Ready(Some(Ok(frame.data)))
            }
        }
    }
}
