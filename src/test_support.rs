//! Test doubles for the HTTP transport, the credentials source and the host UI.

use crate::host_ui::{HostUi, NotifyLevel, WidgetOptions};
use crate::limits::credentials::CredentialSource;
use crate::limits::http::{HttpReply, HttpRequest, HttpTransport};
use crate::limits::types::AuthStore;
use anyhow::{anyhow, Result};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays scripted replies in order and records every request it sees.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<HttpReply, String>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, status: u16, body: serde_json::Value) -> Self {
        self.replies.lock().unwrap().push_back(Ok(HttpReply {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub fn raw_reply(self, status: u16, body: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(HttpReply {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn remaining_replies(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

impl HttpTransport for ScriptedTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpReply> {
        self.requests.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Err(anyhow!("no scripted reply for {}", request.url)),
        }
    }
}

/// Credentials source returning a fixed result.
pub struct StaticCredentials(pub Result<AuthStore, String>);

impl StaticCredentials {
    pub fn from_json(json: serde_json::Value) -> Self {
        Self(Ok(serde_json::from_value(json).unwrap()))
    }
}

impl CredentialSource for StaticCredentials {
    fn load(&self) -> Result<AuthStore> {
        self.0.clone().map_err(|message| anyhow!(message))
    }
}

/// One recorded call on the host UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiCall {
    Notify(String, NotifyLevel),
    Status(String, Option<String>),
    Widget(String, Option<Vec<String>>, WidgetOptions),
}

#[derive(Default)]
pub struct RecordingUi {
    calls: Mutex<Vec<UiCall>>,
}

impl RecordingUi {
    pub fn calls(&self) -> Vec<UiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<(String, NotifyLevel)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                UiCall::Notify(message, level) => Some((message, level)),
                _ => None,
            })
            .collect()
    }

    pub fn widgets(&self) -> Vec<Option<Vec<String>>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                UiCall::Widget(_, lines, _) => Some(lines),
                _ => None,
            })
            .collect()
    }
}

impl HostUi for RecordingUi {
    fn notify(&self, message: &str, level: NotifyLevel) {
        self.calls
            .lock()
            .unwrap()
            .push(UiCall::Notify(message.to_string(), level));
    }

    fn set_status(&self, key: &str, value: Option<&str>) {
        self.calls
            .lock()
            .unwrap()
            .push(UiCall::Status(key.to_string(), value.map(String::from)));
    }

    fn set_widget(&self, key: &str, lines: Option<&[String]>, options: WidgetOptions) {
        self.calls.lock().unwrap().push(UiCall::Widget(
            key.to_string(),
            lines.map(|l| l.to_vec()),
            options,
        ));
    }
}
