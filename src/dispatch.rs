//! Sends one question to every backend and gathers a [`ResponseSet`].

use std::time::Instant;

use futures::future::join_all;

use crate::{
    builder::ClientSet,
    client::{GenerateParams, LLMClient},
    error::LLMError,
    evaluator::ResponseSet,
};

/// A single prompt bound to the client that will answer it.
pub struct QueryCommand<'a> {
    client: &'a dyn LLMClient,
    prompt: &'a str,
    params: GenerateParams,
}

impl<'a> QueryCommand<'a> {
    pub fn new(client: &'a dyn LLMClient, prompt: &'a str, params: GenerateParams) -> Self {
        Self {
            client,
            prompt,
            params,
        }
    }

    pub async fn execute(&self) -> Result<String, LLMError> {
        self.client.generate(self.prompt, &self.params).await
    }
}

/// Text stored in place of a response when the backend call failed.
pub fn failure_placeholder(err: &LLMError) -> String {
    format!("[ERRO] {}: {}", err.kind(), err)
}

/// Queries clients concurrently and folds failures into placeholder responses.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    params: GenerateParams,
}

impl Dispatcher {
    pub fn new(params: GenerateParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &GenerateParams {
        &self.params
    }

    /// Returns one response per client, in the clients' order. Never fails:
    /// a backend error becomes a `[ERRO] <kind>: <message>` entry.
    pub async fn collect(&self, clients: &ClientSet, question: &str) -> ResponseSet {
        let futures = clients.iter().map(|(id, client)| {
            let command = QueryCommand::new(client.as_ref(), question, self.params);
            async move {
                let start = Instant::now();
                let result = command.execute().await;
                (id, result, start.elapsed().as_millis())
            }
        });

        join_all(futures)
            .await
            .into_iter()
            .map(|(id, result, elapsed)| {
                let text = match result {
                    Ok(text) => {
                        log::debug!("{id} answered in {elapsed} ms");
                        text
                    }
                    Err(err) => {
                        log::warn!("Error from provider {id}: {err}");
                        failure_placeholder(&err)
                    }
                };
                (id.clone(), text)
            })
            .collect()
    }
}
