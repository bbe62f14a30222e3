use std::io::{self, BufRead};
use std::num::NonZeroU32;

use dotenv::dotenv;
use tldr::{ClientSettings, CompletionClient, PromptInputs, PromptTemplate, Provider};
use tracing_subscriber::EnvFilter;

const SUMMARIZE_PROMPT: &str = "{{$input}}

One line TLDR with the fewest words.";

const THERMODYNAMICS: &str = "
1st Law of Thermodynamics - Energy cannot be created or destroyed.
2nd Law of Thermodynamics - For a spontaneous process, the entropy of the universe increases.
3rd Law of Thermodynamics - A perfect crystal at zero Kelvin has zero entropy.";

const MOTION: &str = "
1. An object at rest remains at rest, and an object in motion remains in motion at constant speed and in a straight line unless acted on by an unbalanced force.
2. The acceleration of an object depends on the mass of the object and the amount of force applied.
3. Whenever one object exerts a force on another object, the second object exerts an equal and opposite on the first.";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let settings = ClientSettings::from_env(Provider::AzureOpenAI);
    let client = CompletionClient::for_provider(Provider::AzureOpenAI, settings)?;

    let summarize = PromptTemplate::new(SUMMARIZE_PROMPT)
        .with_max_output_tokens(NonZeroU32::new(100).ok_or("max tokens must be positive")?);

    for text in [THERMODYNAMICS, MOTION] {
        let inputs = PromptInputs::new().with("input", text);
        match client.complete(&summarize, &inputs).await {
            Ok(completion) => println!("{}", completion.text),
            Err(e) => println!("error [{}]: {}", e.kind(), e),
        }
    }

    println!("Press enter to exit.");
    let mut line = String::new();
    if let Err(e) = io::stdin().lock().read_line(&mut line) {
        tracing::warn!(error = %e, "failed to read from stdin");
    }

    Ok(())
}
