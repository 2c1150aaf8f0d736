use std::future::Future;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use watch_logging::{watch_error, watch_info};

/// Installs the Ctrl-C and SIGTERM (unix) listeners before returning, then
/// cancels `token` from a background task once one of them fires.
///
/// If no signal handler can be installed the token is left alone and the
/// process can only be stopped by killing it.
pub fn listen(token: CancellationToken) -> JoinHandle<()> {
    let received = install();
    tokio::spawn(async move {
        if received.await {
            watch_info!("Stop requested, shutting down");
            token.cancel();
        }
    })
}

#[cfg(unix)]
fn install() -> impl Future<Output = bool> + Send + 'static {
    use tokio::signal::unix::{signal, Signal, SignalKind};

    let register = |kind: SignalKind, name: &str| match signal(kind) {
        Ok(stream) => Some(stream),
        Err(err) => {
            watch_error!("Could not install {} handler: {}", name, err);
            None
        }
    };
    let mut interrupt = register(SignalKind::interrupt(), "SIGINT");
    let mut terminate = register(SignalKind::terminate(), "SIGTERM");

    async fn recv(stream: &mut Option<Signal>) -> Option<()> {
        match stream {
            Some(stream) => stream.recv().await,
            None => None,
        }
    }

    async move {
        tokio::select! {
            Some(()) = recv(&mut interrupt) => true,
            Some(()) = recv(&mut terminate) => true,
            else => false,
        }
    }
}

#[cfg(windows)]
fn install() -> impl Future<Output = bool> + Send + 'static {
    let ctrl_c = tokio::signal::windows::ctrl_c();
    async move {
        match ctrl_c {
            Ok(mut stream) => stream.recv().await.is_some(),
            Err(err) => {
                watch_error!("Could not listen for Ctrl-C: {}", err);
                false
            }
        }
    }
}
