use crate::application::boundary::Exchange;
use crate::domain::request::RequestId;
use crate::domain::response::Response;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResponseLine<'a> {
    request_id: RequestId,
    id: &'a str,
    status_code: u16,
    response: &'a Response,
}

/// Writes one JSON object per line for each handled request.
pub struct ResponseWriter<W: Write> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_exchange(&mut self, exchange: &Exchange) -> Result<()> {
        let line = ResponseLine {
            request_id: exchange.request_id,
            id: &exchange.id,
            status_code: exchange.response.status_class().status_code(),
            response: &exchange.response,
        };
        serde_json::to_writer(&mut self.writer, &line)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
