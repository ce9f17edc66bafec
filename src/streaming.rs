use crate::error::GlikRequestError;
use async_stream::try_stream;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use serde::de::DeserializeOwned;

/// Optional marker the service prefixes event lines with.
const DATA_PREFIX: &str = "data:";

/// Lazy decoder for streamed responses.
///
/// The wire format is newline-delimited: each non-blank line carries one
/// JSON event, optionally prefixed with `data:`. Blank lines are separators
/// and are skipped. The sequence ends when the connection closes; a decoder
/// is single-use, a new request starts a new stream.
pub struct SseDecoder {
    /// Raw body chunks from the transport.
    byte_stream:
        std::pin::Pin<Box<dyn futures_util::Stream<Item = Result<bytes::Bytes, reqwest::Error>> + Send>>,
    /// Bytes received but not yet terminated by a newline.
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new(response: reqwest::Response) -> Self {
        Self {
            byte_stream: Box::pin(response.bytes_stream()),
            buffer: Vec::new(),
        }
    }

    /// Get the next decoded event, or `None` once the body is exhausted.
    ///
    /// A line that fails to parse as JSON surfaces as
    /// [`GlikRequestError::InvalidEventData`]; it is never skipped.
    pub async fn next_event<T: DeserializeOwned>(
        &mut self,
    ) -> Result<Option<T>, GlikRequestError> {
        loop {
            // Drain complete lines from the buffer first
            while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
                let line_bytes = self.buffer.drain(..=pos).collect::<Vec<u8>>();
                let line = String::from_utf8(line_bytes)?;

                if let Some(event) = decode_line(&line)? {
                    return Ok(Some(event));
                }
            }

            match self.byte_stream.next().await {
                Some(chunk) => self.buffer.extend_from_slice(&chunk?),
                None => {
                    // Stream ended; whatever remains is the final line
                    if self.buffer.is_empty() {
                        return Ok(None);
                    }
                    let line = String::from_utf8(std::mem::take(&mut self.buffer))?;
                    return decode_line(&line);
                }
            }
        }
    }
}

/// Adapt an open response into a `'static` stream of decoded events.
pub(crate) fn event_stream<T>(
    response: reqwest::Response,
) -> BoxStream<'static, Result<T, GlikRequestError>>
where
    T: DeserializeOwned + Send + 'static,
{
    Box::pin(try_stream! {
        let mut decoder = SseDecoder::new(response);

        while let Some(event) = decoder.next_event().await? {
            yield event;
        }
    })
}

/// Decode one line: strip the `data:` marker when present, skip the line if
/// nothing but whitespace remains, otherwise parse it as one JSON document.
fn decode_line<T: DeserializeOwned>(line: &str) -> Result<Option<T>, GlikRequestError> {
    let line = line.trim();
    let payload = line.strip_prefix(DATA_PREFIX).map_or(line, str::trim_start);

    if payload.is_empty() {
        return Ok(None);
    }

    serde_json::from_str(payload)
        .map(Some)
        .map_err(|e| GlikRequestError::InvalidEventData(format!("JSON parse error: {e}")))
}

/// Decode every event contained in a string chunk.
pub fn decode_lines<T: DeserializeOwned>(chunk: &str) -> Result<Vec<T>, GlikRequestError> {
    let mut events = Vec::new();

    for line in chunk.lines() {
        if let Some(event) = decode_line(line)? {
            events.push(event);
        }
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_decode_lines_empty() {
        let result: Result<Vec<Value>, _> = decode_lines("");
        assert!(result.is_ok());
        assert!(result.unwrap().is_empty());
    }

    #[test]
    fn test_decode_lines_single_event() {
        let events: Vec<Value> = decode_lines("data: {\"answer\": \"hi\"}\n\n").unwrap();
        assert_eq!(events, vec![json!({"answer": "hi"})]);
    }

    #[test]
    fn test_decode_lines_blank_line_yields_nothing() {
        let events: Vec<Value> = decode_lines("\n").unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_decode_lines_preserves_order() {
        let events: Vec<Value> = decode_lines("data: {\"a\":1}\ndata: {\"a\":2}\n").unwrap();
        assert_eq!(events, vec![json!({"a": 1}), json!({"a": 2})]);
    }

    #[test]
    fn test_decode_lines_bare_marker_skipped() {
        let events: Vec<Value> = decode_lines("data:\ndata:   \n").unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_decode_lines_without_marker() {
        let events: Vec<Value> = decode_lines("{\"event\": \"ping\"}\n").unwrap();
        assert_eq!(events, vec![json!({"event": "ping"})]);
    }

    #[test]
    fn test_decode_lines_invalid_json() {
        let result: Result<Vec<Value>, _> = decode_lines("data: {invalid json}\n");
        assert!(matches!(
            result,
            Err(GlikRequestError::InvalidEventData(_))
        ));
    }

    #[test]
    fn test_decode_lines_crlf_terminated() {
        let events: Vec<Value> = decode_lines("data: {\"answer\": \"hi\"}\r\n").unwrap();
        assert_eq!(events, vec![json!({"answer": "hi"})]);
    }
}
