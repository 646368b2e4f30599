mod command;
mod resample;
mod schema;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
