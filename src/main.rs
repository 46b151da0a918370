use plainroute::{logger, App, Config, Context, HandlerError, Reply, Route};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = match std::env::args().nth(1) {
        Some(config_path) => Config::load_from(&config_path)?,
        None => Config::load()?,
    };
    logger::init(&cfg)?;

    // Worker threads come from config, CPU count otherwise
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let server = App::from_config(cfg)
        .handle([
            Route::get("/hi", |_ctx: Context| async {
                Ok::<_, HandlerError>((200, "hello"))
            }),
            Route::post("/echo", |ctx: Context| async move {
                Reply::json(200, &ctx.params).map_err(HandlerError::from)
            }),
        ])
        .listen()
        .await?;

    tokio::signal::ctrl_c().await?;
    server.close().await?;
    Ok(())
}
