//! Create an agent, ask it for a joke, and print the conversation.

use foundry_agents::prelude::*;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = AgentsConfig::from_env()?;
    let client = AgentsClient::new(&config)?;

    let agent = client
        .create_agent(
            &CreateAgentRequest::builder()
                .model(config.require_model_deployment()?)
                .name("my-agent")
                .instructions("You are a helpful agent")
                .build(),
        )
        .await?;
    println!("Created agent, agent ID: {}", agent.id);

    let thread = client.create_thread(&CreateThreadRequest::default()).await?;
    println!("Created thread, thread ID: {}", thread.id);

    let message = client
        .create_message(&thread.id, &CreateMessageRequest::user("Hello, tell me a joke"))
        .await?;
    println!("Created message, message ID: {}", message.id);

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let run = client.create_run(&thread.id, &CreateRunRequest::for_agent(&agent.id)).await?;
    let outcome = wait_until_terminal(
        &client.thread_runs(&thread.id),
        &run.id,
        &config.poll_policy(),
        &cancel,
    )
    .await;

    client.delete_agent(&agent.id).await?;
    println!("Deleted agent");

    let run = outcome?;
    println!("Run finished with status: {}", run.status);
    if let Some(error) = &run.last_error {
        println!("Run failed: {error}");
    }

    for message in client.all_messages(&thread.id, ListSortOrder::Asc).await? {
        println!("{}: {}", message.role, message.render_with_citations());
    }

    Ok(())
}
