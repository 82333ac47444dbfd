#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use shiftboard::{
    io,
    model::{Department, TaskStatus},
    storage::{JsonTaskStore, TaskQuery, TaskStore},
    summary::SeedSummary,
    template::{export_config_json, load_config_from_file, StaffingConfig},
    timeline::{layout_day, ClockTime, DisplayFormat, LayoutConfig, TimeGrid},
    ShiftGenerator,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI des plannings du personnel (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON des tâches
    #[arg(long, global = true, default_value = "tasks.json")]
    store: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Générer les shifts de plusieurs jours et les enregistrer
    Seed {
        /// Premier jour (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        #[arg(long, default_value_t = 30)]
        days: u32,
        /// Configuration JSON du personnel (défaut : configuration de l'hôtel)
        #[arg(long)]
        config: Option<String>,
        /// Graine de l'aléa (reproductible)
        #[arg(long)]
        seed: Option<u64>,
        /// Export CSV du bilan
        #[arg(long)]
        summary_csv: Option<String>,
    },

    /// Lister et optionnellement exporter
    List {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Importer des tâches depuis un CSV
    Import {
        #[arg(long)]
        csv: String,
    },

    /// Disposer les tâches d'un jour sur la timeline
    Layout {
        /// Jour affiché (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        #[arg(long)]
        department: Option<String>,
        #[arg(long, default_value_t = 6)]
        start_hour: u32,
        /// Pas de la grille, en minutes
        #[arg(long, default_value_t = 120)]
        interval: u32,
        #[arg(long, default_value_t = 16)]
        slots: usize,
        /// Libellés 12h (`2:00 PM`)
        #[arg(long)]
        twelve_hour: bool,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Vider le stockage
    Clear,

    /// Écrire la configuration par défaut de l'hôtel
    ExportConfig {
        #[arg(long)]
        out: String,
    },
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date (expected YYYY-MM-DD): {raw}"))
}

fn parse_department(raw: Option<String>) -> Result<Option<Department>> {
    raw.map(|d| d.parse::<Department>().map_err(anyhow::Error::msg))
        .transpose()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let mut store = JsonTaskStore::open(&cli.store)?;

    let code = match cli.cmd {
        Commands::Seed {
            start,
            days,
            config,
            seed,
            summary_csv,
        } => {
            if days == 0 {
                bail!("--days must be > 0");
            }
            let start = parse_date(&start)?;
            let config = match config {
                Some(path) => load_config_from_file(path)?,
                None => StaffingConfig::hotel_default(),
            };
            let plans = match seed {
                Some(seed) => ShiftGenerator::seeded(&config, seed).generate_range(start, days)?,
                None => ShiftGenerator::new(&config).generate_range(start, days)?,
            };

            let mut failed = 0usize;
            let mut records = Vec::new();
            for plan in plans {
                for f in &plan.failures {
                    eprintln!("{} {}: {}", plan.date, f.department, f.error);
                }
                failed += plan.failures.len();
                records.extend(plan.records);
            }

            let inserted = store.insert_many(&records)?;
            let summary = SeedSummary::new(&records, inserted, start, days);
            print!("{}", summary.render());
            if let Some(path) = summary_csv {
                summary.export_csv(path)?;
            }
            // Code 2 = au moins un département en échec
            if failed > 0 {
                2
            } else {
                0
            }
        }
        Commands::List {
            from,
            to,
            department,
            status,
            out_json,
            out_csv,
        } => {
            let query = TaskQuery {
                department: parse_department(department)?,
                from: from.as_deref().map(parse_date).transpose()?,
                to: to.as_deref().map(parse_date).transpose()?,
                status: status
                    .map(|s| s.parse::<TaskStatus>().map_err(anyhow::Error::msg))
                    .transpose()?,
            };
            let records = store.fetch(&query)?;
            if let Some(path) = out_json {
                io::export_tasks_json(path, &records)?;
            }
            if let Some(path) = out_csv {
                io::export_tasks_csv(path, &records)?;
            }
            // impression compacte
            for r in &records {
                println!(
                    "{} | {} | {} | {}–{} | {} | {}",
                    r.date, r.department, r.resource_name, r.start_time, r.end_time, r.status, r.title
                );
            }
            0
        }
        Commands::Import { csv } => {
            let records = io::import_tasks_csv(csv)?;
            let inserted = store.insert_many(&records)?;
            println!("Imported {inserted} task(s), {} duplicate(s) ignored", records.len() - inserted);
            0
        }
        Commands::Layout {
            date,
            department,
            start_hour,
            interval,
            slots,
            twelve_hour,
            out_json,
            out_csv,
        } => {
            let day = parse_date(&date)?;
            let mut query = TaskQuery::day(day);
            query.department = parse_department(department)?;
            let records = store.fetch(&query)?;

            let start = ClockTime::from_hm(start_hour, 0)
                .with_context(|| format!("invalid --start-hour {start_hour}"))?;
            let format = if twelve_hour {
                DisplayFormat::TwelveHour
            } else {
                DisplayFormat::TwentyFourHour
            };
            let grid = TimeGrid::new(start, interval, slots, format)?;
            let layout = layout_day(&records, &grid, &LayoutConfig::default());

            if let Some(path) = out_json {
                io::export_layout_json(path, &layout)?;
            }
            if let Some(path) = out_csv {
                io::export_layout_csv(path, &layout)?;
            }
            for row in &layout.rows {
                println!(
                    "{} / {} : {} task(s), {} layer(s)",
                    row.department,
                    row.resource_name,
                    row.tasks.len(),
                    row.layers
                );
            }
            for w in &layout.warnings {
                eprintln!("warning: task {}: {}", w.task_id.as_str(), w.message);
            }
            // Code 2 = WARNING/INCOMPLETE
            if layout.warnings.is_empty() {
                0
            } else {
                2
            }
        }
        Commands::Clear => {
            let removed = store.clear()?;
            println!("Cleared {removed} task(s) from {}", store.path().display());
            0
        }
        Commands::ExportConfig { out } => {
            export_config_json(out, &StaffingConfig::hotel_default())?;
            0
        }
    };

    std::process::exit(code);
}
