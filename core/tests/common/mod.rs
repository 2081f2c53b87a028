//! Background servers for the end-to-end suites.

#![allow(dead_code)]

use std::net::SocketAddr;

use axum::Router;

/// Serve `router` on an ephemeral port from a background thread.
pub fn spawn(router: Router) -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            axum::serve(listener, router).await
        })
        .unwrap();
    });

    addr
}

/// A fresh in-memory Stellar Burgers service.
pub fn spawn_mock_server() -> String {
    format!("http://{}", spawn(mock_server::app()))
}
