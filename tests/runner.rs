mod common;

use common::{fixture_loader, loader_from, EchoClient, FailingClient, ToolClient};
use promptkit::{Error, ErrorKind, LlmClient, PromptRunner, ToolSpecification};
use serde_json::json;
use std::sync::Arc;

const WELCOME_VARS: [(&str, &str); 2] = [("name", "Ada"), ("product", "PromptKit")];

#[tokio::test]
async fn test_welcome_renders_through_echo_client() {
    let echo = EchoClient::new("echo");
    let runner = PromptRunner::new(fixture_loader().await)
        .with_client("openai", echo.clone())
        .unwrap();

    let response = runner.run("welcome", WELCOME_VARS).await.unwrap();
    assert_eq!(response.output, "Hello Ada, welcome to PromptKit!");
    assert!(response.reasoning.is_none());

    let call = echo.last().unwrap();
    assert_eq!(call.model.name, "gpt-4o-mini");
    assert_eq!(call.model.temperature, 0.7);
    assert!(call.tools.is_none());
}

#[tokio::test]
async fn test_missing_placeholder_never_reaches_client() {
    let echo = EchoClient::new("echo");
    let runner = PromptRunner::new(fixture_loader().await)
        .with_client("openai", echo.clone())
        .unwrap();

    let err = runner.run("welcome", [("name", "Ada")]).await.unwrap_err();
    match &err {
        Error::Render { prompt, missing } => {
            assert_eq!(prompt, "welcome");
            assert_eq!(missing, &vec!["product".to_string()]);
        }
        other => panic!("expected Render, got {:?}", other),
    }
    assert_eq!(echo.calls(), 0);
}

#[tokio::test]
async fn test_null_variable_counts_as_missing() {
    let echo = EchoClient::new("echo");
    let runner = PromptRunner::new(fixture_loader().await)
        .with_client("openai", echo.clone())
        .unwrap();

    let err = runner
        .prompt("welcome")
        .var("name", "Ada")
        .var("product", serde_json::Value::Null)
        .execute()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Rendering);
    assert_eq!(echo.calls(), 0);
}

#[tokio::test]
async fn test_non_string_variables_render_by_value() {
    let echo = EchoClient::new("echo");
    let runner = PromptRunner::new(fixture_loader().await).with_client("openai", echo).unwrap();

    let response = runner
        .prompt("welcome")
        .var("name", json!(42))
        .var("product", json!(["a", "b"]))
        .execute()
        .await
        .unwrap();
    assert_eq!(response.output, r#"Hello 42, welcome to ["a","b"]!"#);
}

#[tokio::test]
async fn test_tools_with_plain_client_is_capability_error() {
    let echo = EchoClient::new("plain");
    let runner = PromptRunner::new(fixture_loader().await)
        .with_client("openai", echo.clone())
        .unwrap();

    let err = runner
        .run("lookup", [("customer_id", "c-1"), ("question", "status?")])
        .await
        .unwrap_err();
    match &err {
        Error::Capability { client, prompt, tools } => {
            assert_eq!(client, "plain");
            assert_eq!(prompt, "lookup");
            assert_eq!(*tools, 1);
        }
        other => panic!("expected Capability, got {:?}", other),
    }
    assert_eq!(echo.calls(), 0);
}

#[tokio::test]
async fn test_tool_client_receives_configured_tools() {
    let tools = ToolClient::new();
    let runner = PromptRunner::new(fixture_loader().await)
        .with_client("openai", tools.clone())
        .unwrap();

    let response = runner
        .run("lookup", [("customer_id", "c-1"), ("question", "status?")])
        .await
        .unwrap();
    assert_eq!(response.output, "Look up customer c-1 and answer: status?");
    assert_eq!(response.reasoning.as_deref(), Some("used tools"));
    assert_eq!(tools.last().unwrap().tools, Some(vec!["crm_lookup".to_string()]));
}

#[tokio::test]
async fn test_per_run_tool_override() {
    let tools = ToolClient::new();
    let echo = EchoClient::new("plain");
    let runner = PromptRunner::new(fixture_loader().await)
        .with_client("openai", echo.clone())
        .unwrap();

    runner
        .prompt("welcome")
        .variables(WELCOME_VARS)
        .client(tools.clone())
        .tools(vec![ToolSpecification::new("calendar")])
        .execute()
        .await
        .unwrap();
    assert_eq!(tools.last().unwrap().tools, Some(vec!["calendar".to_string()]));

    // An empty override strips the configured tools, so the plain client is fine.
    runner
        .prompt("lookup")
        .var("customer_id", "c-1")
        .var("question", "status?")
        .tools(Vec::new())
        .execute()
        .await
        .unwrap();
    assert_eq!(echo.calls(), 1);
    assert!(echo.last().unwrap().tools.is_none());
}

#[tokio::test]
async fn test_last_registration_wins() {
    let first = EchoClient::new("first");
    let second = EchoClient::new("second");
    let mut runner = PromptRunner::new(fixture_loader().await);

    assert!(runner
        .register_client("openai", first.clone())
        .unwrap()
        .is_none());
    let replaced = runner
        .register_client("OpenAI", second.clone())
        .unwrap()
        .unwrap();
    assert_eq!(replaced.name(), "first");
    assert_eq!(runner.clients().len(), 1);

    runner.run("welcome", WELCOME_VARS).await.unwrap();
    assert_eq!(first.calls(), 0);
    assert_eq!(second.calls(), 1);
}

#[tokio::test]
async fn test_client_override_beats_registry() {
    let registered = EchoClient::new("registered");
    let override_client = EchoClient::new("override");
    let runner =
        PromptRunner::new(fixture_loader().await)
            .with_client("openai", registered.clone())
            .unwrap();

    runner
        .prompt("welcome")
        .variables(WELCOME_VARS)
        .client(override_client.clone())
        .execute()
        .await
        .unwrap();
    assert_eq!(registered.calls(), 0);
    assert_eq!(override_client.calls(), 1);
}

#[tokio::test]
async fn test_unregistered_provider() {
    let runner = PromptRunner::new(fixture_loader().await)
        .with_client("openai", EchoClient::new("e"))
        .unwrap();
    let err = runner
        .run("summary", [("text", "long text")])
        .await
        .unwrap_err();
    match err {
        Error::ClientNotRegistered { provider } => assert_eq!(provider, "anthropic"),
        other => panic!("expected ClientNotRegistered, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_prompt() {
    let runner = PromptRunner::new(fixture_loader().await);
    let err = runner.run("farewell", WELCOME_VARS).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("Available prompts: lookup, summary, welcome"));
}

#[tokio::test]
async fn test_client_errors_pass_through() {
    let failing = FailingClient::new();
    let runner = PromptRunner::new(fixture_loader().await)
        .with_client("openai", failing.clone())
        .unwrap();

    let err = runner.run("welcome", WELCOME_VARS).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Client);
    assert_eq!(err.to_string(), "Client error: upstream unavailable");
    assert_eq!(failing.calls(), 1);
}

#[tokio::test]
async fn test_escaped_braces_reach_the_client_literally() {
    let echo = EchoClient::new("echo");
    let runner = PromptRunner::new(fixture_loader().await).with_client("anthropic", echo).unwrap();

    let response = runner.run("summary", [("text", "abc")]).await.unwrap();
    assert_eq!(
        response.output,
        "Summarize as JSON like {\"bullets\": [...]}:\nabc"
    );
}

#[tokio::test]
async fn test_reload_is_visible_to_runner() {
    let loader = loader_from(
        r#"
[models]
greet = "m"
[providers]
greet = "local"
[temperatures]
greet = 0.1
[greet]
template = "v1 {x}"
"#,
    );
    let runner =
        PromptRunner::new(Arc::clone(&loader))
            .with_client("local", EchoClient::new("echo"))
            .unwrap();
    assert_eq!(runner.run("greet", [("x", "a")]).await.unwrap().output, "v1 a");

    loader
        .load_str(
            r#"
[models]
greet = "m"
[providers]
greet = "local"
[temperatures]
greet = 0.1
[greet]
template = "v2 {x}"
"#,
            promptkit::ConfigFormat::Toml,
        )
        .unwrap();
    assert_eq!(runner.run("greet", [("x", "a")]).await.unwrap().output, "v2 a");
}

#[tokio::test]
async fn test_concurrent_runs_share_the_runner() {
    let echo = EchoClient::new("echo");
    let runner = PromptRunner::new(fixture_loader().await)
        .with_client("openai", echo.clone())
        .unwrap();

    let runs = ["Ada", "Grace", "Linus"].map(|name| {
        runner
            .prompt("welcome")
            .var("name", name)
            .var("product", "PromptKit")
            .execute()
    });
    let outputs: Vec<String> = futures::future::join_all(runs)
        .await
        .into_iter()
        .map(|r| r.unwrap().output)
        .collect();

    assert_eq!(
        outputs,
        vec![
            "Hello Ada, welcome to PromptKit!",
            "Hello Grace, welcome to PromptKit!",
            "Hello Linus, welcome to PromptKit!",
        ]
    );
    assert_eq!(echo.calls(), 3);
}

#[tokio::test]
async fn test_runner_can_be_spawned() {
    let runner = Arc::new(
        PromptRunner::new(fixture_loader().await)
            .with_client("openai", EchoClient::new("echo"))
            .unwrap(),
    );
    let handle = {
        let runner = Arc::clone(&runner);
        tokio::spawn(async move { runner.run("welcome", WELCOME_VARS).await })
    };
    let response = handle.await.unwrap().unwrap();
    assert_eq!(response.output, "Hello Ada, welcome to PromptKit!");
}

#[tokio::test]
async fn test_unicode_and_hyphenated_placeholders() {
    let loader = loader_from(
        r#"
[models]
greet = "m"
[providers]
greet = "local"
[temperatures]
greet = 0.1
[greet]
template = "Bonjour {prénom} / {first-name} / {1st}"
"#,
    );
    let echo = EchoClient::new("echo");
    let runner = PromptRunner::new(loader)
        .with_client("local", echo.clone())
        .unwrap();

    let response = runner
        .run("greet", [("prénom", "Ada"), ("first-name", "Grace"), ("1st", "Linus")])
        .await
        .unwrap();
    assert_eq!(response.output, "Bonjour Ada / Grace / Linus");

    let err = runner
        .run("greet", Vec::<(&str, &str)>::new())
        .await
        .unwrap_err();
    match err {
        Error::Render { missing, .. } => {
            assert_eq!(missing, vec!["prénom", "first-name", "1st"]);
        }
        other => panic!("expected Render, got {:?}", other),
    }
    assert_eq!(echo.calls(), 1);
}

#[tokio::test]
async fn test_blank_provider_registration_is_rejected() {
    let mut runner = PromptRunner::new(fixture_loader().await);
    let err = runner
        .register_client("  ", EchoClient::new("echo"))
        .err()
        .expect("blank provider registration should fail");
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(runner.clients().is_empty());

    let err = PromptRunner::new(fixture_loader().await)
        .with_client("", EchoClient::new("echo"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}
