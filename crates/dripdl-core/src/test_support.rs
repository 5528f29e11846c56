//! Shared fakes for unit tests: scripted transport, scripted prompt, fixtures.

use crate::model::{Label, Release};
use crate::prompt::{Prompt, PromptError};
use crate::session::LOGIN_PATH;
use crate::transport::{Headers, Response, ResponseHead, Transport, TransportError};
use std::collections::{HashMap, VecDeque};
use std::io::{Cursor, Write};

/// One scripted answer to a request.
#[derive(Debug, Clone)]
pub enum Reply {
    Respond {
        status: u32,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
    },
    Fail(String),
}

impl Reply {
    pub fn status(status: u32) -> Self {
        Reply::bytes(status, Vec::new())
    }

    pub fn json(status: u32, body: &str) -> Self {
        Reply::bytes(status, body.as_bytes().to_vec())
    }

    pub fn bytes(status: u32, body: Vec<u8>) -> Self {
        Reply::Respond {
            status,
            headers: Vec::new(),
            body,
        }
    }

    pub fn fail(msg: &str) -> Self {
        Reply::Fail(msg.to_string())
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let Reply::Respond { headers, .. } = &mut self {
            headers.push((name.to_string(), value.to_string()));
        }
        self
    }
}

/// Successful login reply for user 7 (Ada Lovelace) setting `cookie`.
pub fn login_ok(cookie: &str) -> Reply {
    Reply::json(
        200,
        r#"{"id": 7, "firstname": "Ada", "lastname": "Lovelace",
            "memberships": [{"creative": {"id": 3, "service_name": "Cool Label", "slug": "cool-label"}}]}"#,
    )
    .with_header("Set-Cookie", &format!("{}; path=/; HttpOnly", cookie))
}

#[derive(Debug, Clone)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Transport answering from per-route queues. The last reply of a queue is
/// repeated once the queue is drained; unknown routes answer 404.
#[derive(Debug, Default)]
pub struct FakeTransport {
    routes: HashMap<(&'static str, String), VecDeque<Reply>>,
    calls: Vec<Call>,
}

impl FakeTransport {
    pub fn on_get(&mut self, path: &str, reply: Reply) -> &mut Self {
        self.push("GET", path, reply)
    }

    pub fn on_post(&mut self, path: &str, reply: Reply) -> &mut Self {
        self.push("POST", path, reply)
    }

    fn push(&mut self, method: &'static str, path: &str, reply: Reply) -> &mut Self {
        self.routes
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.calls
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .count()
    }

    /// Number of login POSTs (initial login included).
    pub fn logins(&self) -> usize {
        self.count("POST", LOGIN_PATH)
    }

    fn answer(
        &mut self,
        method: &'static str,
        path: &str,
        headers: &Headers,
        body: &[u8],
    ) -> Result<(ResponseHead, Vec<u8>), TransportError> {
        self.calls.push(Call {
            method,
            path: path.to_string(),
            headers: headers.to_vec(),
            body: body.to_vec(),
        });
        let reply = match self.routes.get_mut(&(method, path.to_string())) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        }
        .unwrap_or_else(|| Reply::status(404));

        match reply {
            Reply::Respond {
                status,
                headers,
                body,
            } => Ok((ResponseHead { status, headers }, body)),
            Reply::Fail(msg) => Err(TransportError::Io(std::io::Error::other(msg))),
        }
    }
}

impl Transport for FakeTransport {
    fn get(&mut self, path: &str, headers: &Headers) -> Result<Response, TransportError> {
        let (head, body) = self.answer("GET", path, headers, &[])?;
        Ok(Response { head, body })
    }

    fn post(
        &mut self,
        path: &str,
        body: &[u8],
        headers: &Headers,
    ) -> Result<Response, TransportError> {
        let (head, body) = self.answer("POST", path, headers, body)?;
        Ok(Response { head, body })
    }

    fn get_to(
        &mut self,
        path: &str,
        headers: &Headers,
        sink: &mut dyn Write,
    ) -> Result<ResponseHead, TransportError> {
        let (head, body) = self.answer("GET", path, headers, &[])?;
        if !head.is_error() {
            sink.write_all(&body)?;
        }
        Ok(head)
    }
}

/// Prompt answering from a fixed list, recording every question.
///
/// Answers not among the offered choices are skipped, the way an operator
/// typing garbage is re-prompted. Running out of answers reads as closed input.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    pub asked: Vec<(String, Vec<String>)>,
    pub notices: Vec<String>,
}

impl ScriptedPrompt {
    pub fn answering(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn choose(&mut self, prompt: &str, choices: &[String]) -> Result<String, PromptError> {
        self.asked.push((prompt.to_string(), choices.to_vec()));
        while let Some(answer) = self.answers.pop_front() {
            if choices.contains(&answer) {
                return Ok(answer);
            }
        }
        Err(PromptError::Closed)
    }

    fn notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

pub fn release(id: u64, slug: Option<&str>, title: &str, artist: &str, label: &str) -> Release {
    Release {
        id,
        slug: slug.map(str::to_string),
        title: title.to_string(),
        artist: artist.to_string(),
        creative_id: Some(3),
        creative: Label {
            id: 3,
            service_name: label.to_string(),
            slug: "cool-label".to_string(),
        },
        unlocked: true,
    }
}

/// In-memory zip archive with the given `(name, contents)` entries.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, data) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}
