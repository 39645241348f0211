#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

use psychlab_bedrock::client::{BoxFuture, ModelRequest, ReportModel};
use psychlab_bedrock::error::BedrockError;
use psychlab_core::models::patient::{Gender, PatientProfile};

pub const ISAA_REPLY: &str = r##"{"summary":"Findings suggest mild difficulties.","fullReport":"# ISAA Assessment Report\n## Test Results & Quantitative Findings\nTotal score 92.\n"}"##;

/// Model double: answers with queued replies, counts calls, and can be held
/// open until released.
pub struct FakeModel {
    replies: Mutex<Vec<Result<Option<String>, String>>>,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
    gate: Option<Notify>,
}

impl FakeModel {
    pub fn replying(body: &str) -> Self {
        Self::with_replies(vec![Ok(Some(body.to_string()))])
    }

    pub fn with_replies(replies: Vec<Result<Option<String>, String>>) -> Self {
        Self {
            replies: Mutex::new(replies),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Every call waits for `release` before answering.
    pub fn gated(body: &str) -> Self {
        let mut model = Self::replying(body);
        model.gate = Some(Notify::new());
        model
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_reply(&self) -> Result<Option<String>, String> {
        let mut replies = self.replies.lock().unwrap();
        if replies.len() > 1 {
            replies.remove(0)
        } else {
            replies[0].clone()
        }
    }
}

impl ReportModel for FakeModel {
    fn complete<'a>(
        &'a self,
        request: &'a ModelRequest,
    ) -> BoxFuture<'a, Result<Option<String>, BedrockError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(request.prompt.clone());
        let reply = self.next_reply().map_err(BedrockError::Invocation);
        Box::pin(async move {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            reply
        })
    }
}

pub fn patient(name: &str) -> PatientProfile {
    PatientProfile {
        name: name.to_string(),
        age: "10".to_string(),
        gender: Gender::Female,
        referral_reason: String::new(),
        clinical_observations: String::new(),
        test_scores: String::new(),
    }
}
