use clap::Parser;
use env_logger::Env;

use prism::Config;

fn main() -> anyhow::Result<()> {
    // RUST_LOG가 없으면 info 수준까지만 출력
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    prism::run(Config::parse())
}
