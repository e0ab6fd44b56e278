use std::path::Path;

use anyhow::Result;
use clap::Parser;
use lensa::output;
use lensa::params::SimParams;
use lensa::settings::{self, CliArgs};
use lensa::sweep::Sweep;

fn main() -> Result<()> {
    let args = CliArgs::parse();

    env_logger::builder()
        .filter_level(settings::log_filter_from_level(args.verbose))
        .parse_default_env()
        .init();

    let settings = settings::load_config_with_args(&args)?;

    if args.sweep {
        let result = Sweep::new(&settings)?.with_progress(true).solve();
        result.print();

        let dir = Path::new(&settings.output_dir);
        let table = output::write_sweep(dir, &result)?;
        let summary = output::write_summary(dir, &result)?;
        log::info!("Wrote {} and {}", table.display(), summary.display());
        return Ok(());
    }

    let params = SimParams::from_settings(&settings);

    if args.headless {
        for line in output::info_lines(&params) {
            println!("{}", line);
        }
        if params.show_refraction && params.refraction().is_tir() {
            println!("{}", output::TIR_MESSAGE);
        }
        return Ok(());
    }

    #[cfg(feature = "macroquad")]
    {
        lensa::viewer::launch(settings);
        Ok(())
    }

    #[cfg(not(feature = "macroquad"))]
    {
        anyhow::bail!("built without the `visualization` feature, use --headless or --sweep")
    }
}
