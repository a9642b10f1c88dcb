//! Network actor - runs conversion and download requests in the Tokio runtime

use std::path::PathBuf;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::{create_client, execute_convert, execute_download};

/// Network actor that processes conversion and download commands.
///
/// Requests run as independent tasks on a shared client; a download may
/// overlap a conversion. There is no cancellation: single-flight for
/// conversions is the app layer's job, and late responses are its to
/// discard.
pub struct NetworkActor {
    client: reqwest::Client,
    base_url: String,
    save_dir: PathBuf,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(
        base_url: String,
        save_dir: PathBuf,
        response_tx: mpsc::UnboundedSender<NetworkResponse>,
    ) -> Self {
        NetworkActor {
            client: create_client(),
            base_url,
            save_dir,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Convert { id, file }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();
                            let base_url = self.base_url.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, name = %file.name, size = file.size_bytes(), "uploading image for conversion");
                                let result = execute_convert(&client, &base_url, file, id).await;
                                tracing::info!(id, "conversion request completed");
                                let _ = response_tx.send(result);
                            });
                        }

                        Some(NetworkCommand::Download { id, sketch_data }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();
                            let base_url = self.base_url.clone();
                            let save_dir = self.save_dir.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, "requesting sketch download");
                                let result =
                                    execute_download(&client, &base_url, sketch_data, &save_dir, id)
                                        .await;
                                tracing::info!(id, "download request completed");
                                let _ = response_tx.send(result);
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => break,
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}
