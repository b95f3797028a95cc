//! Fetch `/todos` and branch on the status code.
//!
//! ```text
//! cargo run -p feather-client --example list_todos -- https://jsonplaceholder.typicode.com
//! ```

use feather_client::FeatherClient;

#[tokio::main]
async fn main() {
    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://127.0.0.1:3000".to_string());
    let client = FeatherClient::new(base_url, None);

    match client.todos().await {
        Ok(response) if response.is_success() => {
            let todos = response.content.unwrap_or_default();
            println!("ok: {} todos", todos.len());
            for todo in todos.iter().take(5) {
                println!("  [{}] {}", if todo.completed { "x" } else { " " }, todo.title);
            }
        }
        Ok(response) if response.status_code == 400 => println!("bad request"),
        Ok(response) => println!("unexpected status {}", response.status_code),
        Err(e) => match std::error::Error::source(&e) {
            Some(cause) => println!("request failed: {e}: {cause}"),
            None => println!("request failed: {e}"),
        },
    }
}
