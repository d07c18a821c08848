use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::StreamExt;
use tokio::sync::mpsc;
use tracing::debug;

/// Simple WebSocket abstraction - all we care about is send/receive
#[async_trait]
pub trait SocketWrapper: Send {
    /// Send a text message to the client
    async fn send_message(&mut self, message: String) -> Result<(), SocketError>;

    /// Receive the next message from the client (None if connection closed)
    async fn receive_message(&mut self) -> Result<Option<String>, SocketError>;

    /// Close the connection
    async fn close(&mut self) -> Result<(), SocketError>;
}

#[derive(Debug)]
pub enum SocketError {
    SendFailed(String),
    ReceiveFailed(String),
}

/// Direct implementation on axum's WebSocket
#[async_trait]
impl SocketWrapper for WebSocket {
    async fn send_message(&mut self, message: String) -> Result<(), SocketError> {
        self.send(Message::Text(message))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }

    async fn receive_message(&mut self) -> Result<Option<String>, SocketError> {
        match self.next().await {
            Some(Ok(Message::Text(text))) => Ok(Some(text)),
            Some(Ok(Message::Close(_))) => Ok(None),
            Some(Ok(_)) => Ok(Some(String::new())), // Binary/ping/pong: drained like any inbound
            Some(Err(e)) => Err(SocketError::ReceiveFailed(e.to_string())),
            None => Ok(None), // Connection closed
        }
    }

    async fn close(&mut self) -> Result<(), SocketError> {
        self.send(Message::Close(None))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }
}

/// A managed real-time connection for one room.
///
/// Pushes arriving on the outbound channel (fed by the notifier) are written
/// to the socket; inbound client messages carry no meaning in this protocol
/// and are drained. The connection runs until the client disconnects or a
/// send fails.
pub struct Connection {
    pub room_id: String,
    socket: Box<dyn SocketWrapper>,
    outbound_receiver: mpsc::UnboundedReceiver<String>,
}

impl Connection {
    pub fn new(
        room_id: String,
        socket: Box<dyn SocketWrapper>,
        outbound_receiver: mpsc::UnboundedReceiver<String>,
    ) -> Self {
        Self {
            room_id,
            socket,
            outbound_receiver,
        }
    }

    /// Run the connection - forwards pushes and drains inbound until disconnect
    pub async fn run(mut self) -> Result<(), SocketError> {
        loop {
            tokio::select! {
                // Outbound pushes (notifier -> client)
                msg = self.outbound_receiver.recv() => {
                    match msg {
                        Some(message) => {
                            self.socket.send_message(message).await?
                        }
                        None => break, // Channel closed, disconnect
                    }
                }

                // Inbound messages (client -> server) carry no meaning here
                msg = self.socket.receive_message() => {
                    match msg {
                        Ok(Some(message)) => {
                            debug!(
                                room_id = %self.room_id,
                                message = %message,
                                "Ignoring inbound client message"
                            );
                        }
                        Ok(None) => break, // Client disconnected
                        Err(e) => return Err(e),
                    }
                }
            }
        }

        // Clean disconnect
        let _ = self.socket.close().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Scripted socket: records sends, replays queued inbound results
    struct MockSocket {
        sent: Arc<Mutex<Vec<String>>>,
        inbound: Vec<Result<Option<String>, SocketError>>,
        fail_sends: bool,
        closed: Arc<Mutex<bool>>,
    }

    #[async_trait]
    impl SocketWrapper for MockSocket {
        async fn send_message(&mut self, message: String) -> Result<(), SocketError> {
            if self.fail_sends {
                return Err(SocketError::SendFailed("boom".to_string()));
            }
            self.sent.lock().unwrap().push(message);
            Ok(())
        }

        async fn receive_message(&mut self) -> Result<Option<String>, SocketError> {
            if self.inbound.is_empty() {
                // Block forever: a quiet client that never sends anything
                futures::future::pending::<()>().await;
                unreachable!()
            }
            self.inbound.remove(0)
        }

        async fn close(&mut self) -> Result<(), SocketError> {
            *self.closed.lock().unwrap() = true;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_outbound_pushes_reach_the_socket() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let closed = Arc::new(Mutex::new(false));
        let socket = MockSocket {
            sent: Arc::clone(&sent),
            inbound: vec![],
            fail_sends: false,
            closed: Arc::clone(&closed),
        };

        let (tx, rx) = mpsc::unbounded_channel();
        let connection = Connection::new("R1".to_string(), Box::new(socket), rx);

        tx.send(r#"{"action":"refresh"}"#.to_string()).unwrap();
        tx.send(r#"{"action":"goto_result"}"#.to_string()).unwrap();
        drop(tx); // Channel closes after the pushes drain

        connection.run().await.unwrap();

        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], r#"{"action":"refresh"}"#);
        assert_eq!(sent[1], r#"{"action":"goto_result"}"#);
        assert!(*closed.lock().unwrap());
    }

    #[tokio::test]
    async fn test_client_disconnect_ends_the_run() {
        let socket = MockSocket {
            sent: Arc::new(Mutex::new(Vec::new())),
            inbound: vec![Ok(Some("chatter".to_string())), Ok(None)],
            fail_sends: false,
            closed: Arc::new(Mutex::new(false)),
        };

        let (_tx, rx) = mpsc::unbounded_channel();
        let connection = Connection::new("R1".to_string(), Box::new(socket), rx);

        // Inbound chatter is drained, then the close ends the loop
        connection.run().await.unwrap();
    }

    #[tokio::test]
    async fn test_send_failure_surfaces_as_error() {
        let socket = MockSocket {
            sent: Arc::new(Mutex::new(Vec::new())),
            inbound: vec![],
            fail_sends: true,
            closed: Arc::new(Mutex::new(false)),
        };

        let (tx, rx) = mpsc::unbounded_channel();
        let connection = Connection::new("R1".to_string(), Box::new(socket), rx);
        tx.send("push".to_string()).unwrap();

        let result = connection.run().await;
        assert!(matches!(result, Err(SocketError::SendFailed(_))));
    }

    #[tokio::test]
    async fn test_receive_error_surfaces_as_error() {
        let socket = MockSocket {
            sent: Arc::new(Mutex::new(Vec::new())),
            inbound: vec![Err(SocketError::ReceiveFailed("reset".to_string()))],
            fail_sends: false,
            closed: Arc::new(Mutex::new(false)),
        };

        let (_tx, rx) = mpsc::unbounded_channel();
        let connection = Connection::new("R1".to_string(), Box::new(socket), rx);

        let result = connection.run().await;
        assert!(matches!(result, Err(SocketError::ReceiveFailed(_))));
    }
}
