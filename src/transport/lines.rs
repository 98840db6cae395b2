//! Newline framing for streamed response bodies (Bytes -> String lines)
//!
//! Framing rules:
//! - a line ends at `\n`; a single trailing `\r` is dropped
//! - a final unterminated line is emitted at end-of-stream
//! - when the transport fails, the bytes buffered since the last newline are
//!   emitted as a final line and the failure follows it
//! - lines are decoded as lossy UTF-8

use crate::{BoxStream, Error};
use bytes::{Bytes, BytesMut};
use futures::{stream, Stream, StreamExt};
use std::pin::Pin;
use tokio_util::codec::{AnyDelimiterCodec, AnyDelimiterCodecError, Decoder};

/// Size of the line buffer, newline included.
///
/// A line needs `MAX_LINE_BYTES - 1` bytes or fewer of content to fit.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

/// Split a byte stream into lines as the bytes arrive.
///
/// Each item is yielded as soon as its terminating newline has been read; the
/// body is never buffered as a whole. Any error ends the stream and is
/// reported as [`Error::StreamRead`].
pub fn decode_lines<S, E>(input: S) -> BoxStream<'static, String>
where
    S: Stream<Item = std::result::Result<Bytes, E>> + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    let state = LineState {
        input: Box::pin(input),
        buf: BytesMut::new(),
        codec: AnyDelimiterCodec::new_with_max_length(
            b"\n".to_vec(),
            Vec::new(),
            MAX_LINE_BYTES - 1,
        ),
        pending: None,
        drained: false,
        done: false,
    };

    Box::pin(stream::unfold(state, |mut state| async move {
        let item = state.next_line().await?;
        Some((item, state))
    }))
}

struct LineState<S> {
    input: Pin<Box<S>>,
    buf: BytesMut,
    codec: AnyDelimiterCodec,
    /// Transport failure held back until the buffered tail is out.
    pending: Option<Error>,
    /// Input is exhausted (cleanly or not) and the tail has been decoded.
    drained: bool,
    done: bool,
}

impl<S, E> LineState<S>
where
    S: Stream<Item = std::result::Result<Bytes, E>>,
    E: std::error::Error,
{
    async fn next_line(&mut self) -> Option<crate::Result<String>> {
        if self.done {
            return None;
        }
        if self.drained {
            self.done = true;
            return self.pending.take().map(Err);
        }

        loop {
            match self.codec.decode(&mut self.buf) {
                Ok(Some(raw)) => return Some(Ok(to_line(&raw))),
                Ok(None) => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(codec_error(e)));
                }
            }

            match self.input.next().await {
                Some(Ok(chunk)) => self.buf.extend_from_slice(&chunk),
                Some(Err(e)) => {
                    self.pending = Some(Error::stream_read(e.to_string()));
                    break;
                }
                None => break,
            }
        }

        self.drained = true;
        match self.codec.decode_eof(&mut self.buf) {
            Ok(Some(raw)) => Some(Ok(to_line(&raw))),
            Ok(None) => {
                self.done = true;
                self.pending.take().map(Err)
            }
            Err(e) => {
                self.done = true;
                Some(Err(codec_error(e)))
            }
        }
    }
}

fn codec_error(e: AnyDelimiterCodecError) -> Error {
    match e {
        AnyDelimiterCodecError::MaxChunkLengthExceeded => Error::stream_read(format!(
            "line does not fit in {MAX_LINE_BYTES} bytes"
        )),
        AnyDelimiterCodecError::Io(e) => Error::stream_read(e.to_string()),
    }
}

fn to_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}
