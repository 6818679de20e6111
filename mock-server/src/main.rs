use tokio::net::TcpListener;

/// Standalone echo server for trying the client by hand:
/// `PORT=3000 cargo run -p mock-server`.
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let listener = TcpListener::bind(("127.0.0.1", port.parse::<u16>().unwrap_or(3000))).await?;
    let addr = listener.local_addr()?;
    println!("listening on http://{addr} (/anything, /status/{{code}}, /bytes/{{n}})");
    mock_server::run(listener).await
}
