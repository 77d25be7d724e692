// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Downline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Downline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Runs controller requests on the tokio runtime and hands the outcomes back to the UI thread.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

use crate::api::MemberApi;
use crate::controller::{Mutation, Outcome, Request};

/// Performs one request against `api`.
pub async fn execute(api: &dyn MemberApi, request: Request) -> Outcome {
    match request {
        Request::FetchTree => Outcome::TreeLoaded(api.fetch_tree().await),
        Request::Search { query } => Outcome::SearchFinished(api.search(&query).await),
        Request::Create { payload } => Outcome::MutationFinished {
            mutation: Mutation::Create,
            result: api.create_member(&payload).await,
        },
        Request::Update { id, payload } => Outcome::MutationFinished {
            mutation: Mutation::Update,
            result: api.update_member(&id, &payload).await,
        },
        Request::Delete { id } => Outcome::MutationFinished {
            mutation: Mutation::Delete,
            result: api.delete_member(&id).await,
        },
        Request::CascadeDelete { id } => Outcome::MutationFinished {
            mutation: Mutation::CascadeDelete,
            result: api.delete_member_cascade(&id).await,
        },
    }
}

/// Fire-and-forget request runner.
///
/// Requests are spawned independently; outcomes arrive in completion order.
pub struct Dispatcher {
    api: Arc<dyn MemberApi>,
    runtime: Handle,
    tx: UnboundedSender<Outcome>,
    rx: UnboundedReceiver<Outcome>,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn MemberApi>, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            runtime,
            tx,
            rx,
        }
    }

    pub fn dispatch(&self, request: Request) {
        log::debug!("dispatching {request:?}");
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let outcome = execute(api.as_ref(), request).await;
            // The receiver only goes away when the UI shuts down.
            let _ = tx.send(outcome);
        });
    }

    /// Next finished outcome, without blocking.
    pub fn try_next(&mut self) -> Option<Outcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Waits for the next finished outcome.
    pub async fn next_outcome(&mut self) -> Option<Outcome> {
        self.rx.recv().await
    }
}
