use brigade::config::{ConfigError, Scenario, SimSettings};
use brigade::runtime::{setup_tracing, RestaurantSystem};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), ConfigError> {
    setup_tracing();

    let path = std::env::args().nth(1).unwrap_or_else(|| "scenarios/dinner.txt".to_string());
    info!(%path, "loading scenario");
    let scenario = Scenario::load(&path)?;

    let mut system = RestaurantSystem::new(scenario, SimSettings::default());

    // Render the transcript while the simulation runs; the task ends on its
    // own once the system drops the sending side.
    let transcript = system.take_events();
    let printer = tokio::spawn(async move {
        if let Some(mut events) = transcript {
            while let Some(event) = events.recv().await {
                println!("{event}");
            }
        }
    });

    let summary = system.run().await;
    let _ = printer.await;

    println!();
    println!("{summary}");
    Ok(())
}
