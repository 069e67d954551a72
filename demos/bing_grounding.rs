//! Ask a Bing-grounded agent for recent news and show how it searched.

use foundry_agents::prelude::*;
use foundry_agents::types::StepToolCall;
use futures::TryStreamExt;
use tokio_util::sync::CancellationToken;

const QUESTION: &str = "What is the latest news of Microsoft? Give me top 3 news articles with \
their summaries. Importantly, do analyze business impacts or implications of these news \
articles, show me only significant news articles that have business impacts.";

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = AgentsConfig::from_env()?;
    let client = AgentsClient::new(&config)?;

    let bing = BingGroundingTool::new(config.require_bing_connection_id()?)
        .with_freshness("day")
        .with_count(5)
        .with_set_lang("en")
        .with_market("us");

    let mut agents = client.agents(ListOptions::default().with_limit(100));
    while let Some(agent) = agents.try_next().await? {
        println!("{} {}", agent.id, agent.name.as_deref().unwrap_or("-"));
    }
    drop(agents);

    let agent = client
        .create_agent(
            &CreateAgentRequest::builder()
                .model(config.require_model_deployment()?)
                .name("agent-with-bing-grounding")
                .instructions("You are a helpful agent")
                .tools(bing.definitions())
                .build(),
        )
        .await?;
    let agent = client.get_agent(&agent.id).await?;
    println!("Created agent, ID: {}", agent.id);

    let thread = match config.thread_id() {
        Some(thread_id) => client.get_thread(thread_id).await?,
        None => client.create_thread(&CreateThreadRequest::default()).await?,
    };
    println!("Using thread, ID: {}", thread.id);

    let message = client
        .create_message(&thread.id, &CreateMessageRequest::user(QUESTION))
        .await?;
    println!("Created message, ID: {}", message.id);

    let run = client
        .create_and_process(
            &thread.id,
            &CreateRunRequest::for_agent(&agent.id),
            &config.poll_policy(),
            &CancellationToken::new(),
        )
        .await?;
    println!("Run finished with status: {}", run.status);
    if let Some(error) = &run.last_error {
        println!("Run failed: {error}");
    }

    let mut steps = client.run_steps(&thread.id, &run.id, ListOptions::default());
    while let Some(step) = steps.try_next().await? {
        println!("Step {} status: {}", step.id, step.status);
        if step.tool_calls().is_empty() {
            println!("  No tool calls found in this step.");
        } else {
            println!("  Tool calls:");
        }
        for call in step.tool_calls() {
            println!("    Tool Call ID: {}", call.id().unwrap_or("-"));
            println!("    Type: {}", call.kind());
            if let StepToolCall::BingGrounding { bing_grounding, .. } = call {
                if let Some(url) = &bing_grounding.request_url {
                    println!("    Bing request URL: {url}");
                }
            }
        }
        println!();
    }
    drop(steps);

    client.delete_agent(&agent.id).await?;
    println!("Deleted agent");

    if let Some(response) = client
        .get_last_message_by_role(&thread.id, MessageRole::Agent)
        .await?
    {
        for text in response.text_messages() {
            println!("Agent response: {}", text.value);
        }
        for annotation in response.url_citation_annotations() {
            let citation = annotation.citation;
            println!(
                "URL Citation: [{}]({})",
                citation.title.as_deref().unwrap_or(&citation.url),
                citation.url
            );
        }
    }

    Ok(())
}
