use lcv_alloc::solver::greedy::run;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run::init_tracing();
    run::run().await?;
    Ok(())
}
