use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use bhava_engine::{
    Backend, DmsStyle, HouseSystem, Settings, compute_houses_with, dec_to_dms, format_dms,
    render_dms,
};
use bhava_ephem::{Ephemeris, global};
use bhava_time::UtTime;

mod logging;

#[derive(Parser)]
#[command(name = "bhava", about = "Sidereal house-system calculator")]
struct Cli {
    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the twelve houses and print the response as JSON
    Houses {
        #[command(flatten)]
        chart: ChartArgs,
        /// House system: sign-based, arc-trisection, time-division (or whole-sign, sripati, placidus)
        #[arg(long)]
        system: Option<String>,
        /// Backend: auto, native-geometric, provider-delegated
        #[arg(long)]
        backend: Option<String>,
        /// Include house borders
        #[arg(long)]
        borders: bool,
        /// Include house widths
        #[arg(long)]
        widths: bool,
        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Print the four chart angles in decimal degrees and DMS
    Angles {
        #[command(flatten)]
        chart: ChartArgs,
        /// Seconds decimals in the DMS column
        #[arg(long, default_value = "3")]
        precision: u8,
    },
    /// Convert decimal degrees to DMS
    Dms {
        /// Angle in decimal degrees
        #[arg(allow_hyphen_values = true)]
        deg: f64,
        /// Seconds decimals (0-9)
        #[arg(long, default_value = "3")]
        precision: u8,
        /// Do not zero-pad minutes and seconds
        #[arg(long)]
        unpadded: bool,
        /// Use d ' " instead of ° ′ ″
        #[arg(long)]
        ascii: bool,
    },
    /// Convert a UT date/time to a Julian Day, or back
    Jd {
        /// UT date/time (YYYY-MM-DDThh:mm:ss[Z])
        #[arg(long, conflicts_with = "jd")]
        date: Option<String>,
        /// Julian Day (UT) to convert to a date
        #[arg(long, allow_hyphen_values = true)]
        jd: Option<f64>,
    },
}

/// Moment, place and settings shared by chart commands.
#[derive(Args)]
struct ChartArgs {
    /// Julian Day (UT)
    #[arg(
        long,
        allow_hyphen_values = true,
        conflicts_with = "date",
        required_unless_present = "date"
    )]
    jd: Option<f64>,
    /// UT date/time (YYYY-MM-DDThh:mm:ss[Z])
    #[arg(long)]
    date: Option<String>,
    /// Geographic latitude in degrees, north positive
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,
    /// Geographic longitude in degrees, east positive
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,
    /// Ayanamsa name (e.g. lahiri, kp, raman, fagan-bradley)
    #[arg(long)]
    ayanamsa: Option<String>,
    /// Settings file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

fn load_settings(path: Option<&Path>) -> Settings {
    let Some(path) = path else {
        return Settings::default();
    };
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("cannot read {}: {e}", path.display())));
    Settings::from_toml_str(&content).unwrap_or_else(|e| fail(e))
}

fn resolve_jd(chart: &ChartArgs) -> f64 {
    match (chart.jd, &chart.date) {
        (Some(jd), _) => jd,
        (None, Some(date)) => date
            .parse::<UtTime>()
            .map(|t| t.to_jd_ut())
            .unwrap_or_else(|e| fail(e)),
        (None, None) => fail("either --jd or --date is required"),
    }
}

/// Settings plus the process-wide provider they configure.
fn prepare(chart: &ChartArgs) -> (Settings, &'static Ephemeris) {
    let settings = load_settings(chart.config.as_deref());
    let eph = global::init(settings.provider).unwrap_or_else(|e| fail(e));
    (settings, eph)
}

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    match cli.command {
        Commands::Houses {
            chart,
            system,
            backend,
            borders,
            widths,
            compact,
        } => {
            let (settings, eph) = prepare(&chart);
            let mut req = settings.request(resolve_jd(&chart), chart.lat, chart.lon);
            if let Some(name) = chart.ayanamsa {
                req = req.with_ayanamsa(name);
            }
            if let Some(name) = system {
                let system = HouseSystem::from_name(&name)
                    .unwrap_or_else(|| fail(format!("unknown house system '{name}'")));
                req = req.with_system(system);
            }
            if let Some(name) = backend {
                let backend = Backend::from_name(&name)
                    .unwrap_or_else(|| fail(format!("unknown backend '{name}'")));
                req = req.with_backend(backend);
            }
            if borders {
                req = req.with_borders();
            }
            if widths {
                req = req.with_widths();
            }

            let resp = compute_houses_with(eph, &req).unwrap_or_else(|e| fail(e));
            let json = if compact {
                serde_json::to_string(&resp)
            } else {
                serde_json::to_string_pretty(&resp)
            };
            println!("{}", json.unwrap_or_else(|e| fail(e)));
        }

        Commands::Angles { chart, precision } => {
            let (settings, eph) = prepare(&chart);
            let mut req = settings.request(resolve_jd(&chart), chart.lat, chart.lon);
            if let Some(name) = chart.ayanamsa {
                req = req.with_ayanamsa(name);
            }
            let resp = compute_houses_with(eph, &req).unwrap_or_else(|e| fail(e));
            let style = DmsStyle::default().with_precision(precision);
            let a = resp.angles;

            println!(
                "Ayanamsa ({}): {:.6} deg",
                resp.meta.ayanamsa.name, resp.meta.ayanamsa.value_deg
            );
            println!("Obliquity:  {:.6} deg", resp.meta.epsilon_deg);
            println!("LST:        {:.6} h", resp.meta.lst_hours);
            println!("RAMC:       {:.6} deg", resp.meta.ramc_deg);
            for (label, value) in [
                ("Asc", a.asc_deg_sid),
                ("MC", a.mc_deg_sid),
                ("Desc", a.desc_deg_sid),
                ("IC", a.ic_deg_sid),
            ] {
                let dms = dec_to_dms(value, precision).unwrap_or_else(|e| fail(e));
                println!("{label:<5} {value:>12.6}  {}", render_dms(&dms, &style));
            }
            if let Some(notes) = resp.meta.notes {
                eprintln!("Note: {notes}");
            }
        }

        Commands::Dms {
            deg,
            precision,
            unpadded,
            ascii,
        } => {
            let mut style = DmsStyle::default().with_precision(precision);
            if unpadded {
                style = style.unpadded();
            }
            if ascii {
                style = style.ascii();
            }
            println!("{}", format_dms(deg, &style).unwrap_or_else(|e| fail(e)));
        }

        Commands::Jd { date, jd } => match (date, jd) {
            (Some(date), _) => {
                let t: UtTime = date.parse().unwrap_or_else(|e| fail(e));
                println!("{:.6}", t.to_jd_ut());
            }
            (None, Some(jd)) => println!("{}", UtTime::from_jd_ut(jd)),
            (None, None) => fail("either --date or --jd is required"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn houses_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "bhava", "houses", "--jd", "2451545", "--lat", "-33.87", "--lon", "-70.5",
            "--system", "placidus",
        ])
        .unwrap();
        match cli.command {
            Commands::Houses { chart, system, .. } => {
                assert_eq!(chart.lat, -33.87);
                assert_eq!(chart.lon, -70.5);
                assert_eq!(system.as_deref(), Some("placidus"));
                assert_eq!(resolve_jd(&chart), 2_451_545.0);
            }
            _ => panic!("expected houses"),
        }
    }

    #[test]
    fn date_converts_to_jd() {
        let cli = Cli::try_parse_from([
            "bhava", "angles", "--date", "2000-01-01T12:00:00Z", "--lat", "0", "--lon", "0",
        ])
        .unwrap();
        let Commands::Angles { chart, .. } = cli.command else {
            panic!("expected angles");
        };
        assert!((resolve_jd(&chart) - 2_451_545.0).abs() < 1e-9);
    }

    #[test]
    fn jd_accepts_negative_day_numbers() {
        let cli = Cli::try_parse_from(["bhava", "jd", "--jd", "-1000.5"]).unwrap();
        let Commands::Jd { date, jd } = cli.command else {
            panic!("expected jd");
        };
        assert!(date.is_none());
        assert_eq!(jd, Some(-1000.5));

        let cli = Cli::try_parse_from([
            "bhava", "houses", "--jd", "-1000.5", "--lat", "0", "--lon", "0",
        ])
        .unwrap();
        let Commands::Houses { chart, .. } = cli.command else {
            panic!("expected houses");
        };
        assert_eq!(chart.jd, Some(-1000.5));
    }

    #[test]
    fn jd_and_date_conflict() {
        assert!(
            Cli::try_parse_from([
                "bhava", "houses", "--jd", "2451545", "--date", "2000-01-01T12:00:00",
                "--lat", "0", "--lon", "0",
            ])
            .is_err()
        );
    }
}
