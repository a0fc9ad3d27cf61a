//! Umbrella Drop entry point
//!
//! Headless native runner: the autopilot plays sessions against a file-backed
//! store. The shop, progress, settings, city lists and birthdays can be
//! driven from the command line.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Timelike;
use clap::{Parser, Subcommand, ValueEnum};

use umbrella_drop::autopilot::Autopilot;
use umbrella_drop::birthdays::{self, Birthday};
use umbrella_drop::haptics::Haptics;
use umbrella_drop::persistence::{FileStore, KeyValueStore, MemoryStore};
use umbrella_drop::preferences;
use umbrella_drop::shop::{ItemKind, PurchaseOutcome};
use umbrella_drop::{Language, Settings, Theme, Tuning, UmbrellaGame};

/// Simulated time after which a single run is cut off (10 minutes)
const MAX_RUN_MS: u64 = 10 * 60 * 1000;

/// Umbrella Drop
#[derive(Parser)]
#[command(version, about = "Umbrella Drop - catch the rain, collect coins, dress up")]
struct Cli {
    /// Progress file (default: ~/.umbrella_drop.json)
    #[arg(long, value_name = "PATH", global = true)]
    store: Option<PathBuf>,

    /// Keep everything in memory; nothing is read or written
    #[arg(long, global = true)]
    ephemeral: bool,

    /// JSON tuning overrides
    #[arg(long, value_name = "PATH", global = true)]
    tuning: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Let the autopilot play
    Play {
        /// Number of sessions
        #[arg(long, default_value_t = 1)]
        games: u32,
        /// RNG seed (default: clock)
        #[arg(long)]
        seed: Option<u64>,
        /// Chance the autopilot tries to catch a drop (0-1)
        #[arg(long, default_value_t = 0.9)]
        skill: f64,
        /// Playfield height override
        #[arg(long)]
        height: Option<f32>,
    },
    /// Show best score, coins and inventory
    Stats,
    /// Buy an item from the shop, or select it if already owned
    Shop { kind: ItemArg, item: String },
    /// Wipe high score, coins and shop data
    Reset,
    /// Show settings, or change the ones given
    Settings {
        /// tr or en
        #[arg(long)]
        language: Option<Language>,
        /// light, dark or auto
        #[arg(long)]
        theme: Option<Theme>,
        /// Vibration cues (true/false)
        #[arg(long)]
        haptics: Option<bool>,
        /// Treat the system color scheme as dark when resolving auto
        #[arg(long)]
        system_dark: bool,
    },
    /// Favorite cities and recent searches
    Cities {
        #[command(subcommand)]
        action: CityCommand,
    },
    /// Manage saved birthdays
    Birthdays {
        #[command(subcommand)]
        action: BirthdayCommand,
    },
}

#[derive(Subcommand)]
enum CityCommand {
    /// List favorites and recent searches
    List,
    /// Add a city to favorites, or remove it if already there
    Favorite { city: String },
    /// Record a city search
    Search { city: String },
    /// Complete a partly typed city name from recents and favorites
    Suggest { input: String },
}

#[derive(Subcommand)]
enum BirthdayCommand {
    /// List birthdays, soonest first
    List,
    /// Add a birthday (date as YYYY-MM-DD)
    Add { id: String, name: String, date: String },
    /// Remove a birthday by id
    Remove { id: String },
    /// Remove all birthdays
    Clear,
}

#[derive(Clone, Copy, ValueEnum)]
enum ItemArg {
    Character,
    Umbrella,
}

impl From<ItemArg> for ItemKind {
    fn from(arg: ItemArg) -> Self {
        match arg {
            ItemArg::Character => ItemKind::Character,
            ItemArg::Umbrella => ItemKind::Umbrella,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let store: Box<dyn KeyValueStore> = if cli.ephemeral {
        Box::new(MemoryStore::new())
    } else {
        let path = match cli.store {
            Some(path) => path,
            None => FileStore::default_path()?,
        };
        Box::new(FileStore::open(path)?)
    };

    let mut tuning = match &cli.tuning {
        Some(path) => Tuning::from_file(path)?,
        None => Tuning::default(),
    };

    let command = cli.command.unwrap_or(Command::Play {
        games: 1,
        seed: None,
        skill: 0.9,
        height: None,
    });

    match command {
        Command::Play {
            games,
            seed,
            skill,
            height,
        } => {
            if let Some(height) = height {
                tuning.field_height = height;
                tuning.sanitize();
            }
            let seed = seed.unwrap_or_else(clock_seed);
            let mut game = UmbrellaGame::new(store, Haptics::default(), tuning, seed);
            play(&mut game, games, seed, skill);
        }
        Command::Stats => {
            let game = UmbrellaGame::new(store, Haptics::default(), tuning, 0);
            let profile = game.profile();
            println!("Best score: {}", profile.high_score);
            println!("Coins:      {}", profile.total_coins);
            println!(
                "Characters: {} (selected {})",
                profile.inventory.owned_characters.join(" "),
                profile.inventory.selected_character
            );
            println!(
                "Umbrellas:  {} (selected {})",
                profile.inventory.owned_umbrellas.join(" "),
                profile.inventory.selected_umbrella
            );
        }
        Command::Shop { kind, item } => {
            let mut game = UmbrellaGame::new(store, Haptics::default(), tuning, 0);
            game.open_shop();
            match game.shop_action(kind.into(), &item) {
                Some(PurchaseOutcome::Purchased { remaining }) => {
                    println!("Bought {item}, {remaining} coins left");
                }
                Some(PurchaseOutcome::InsufficientFunds { price, available }) => {
                    println!("Not enough coins: {item} costs {price}, you have {available}");
                }
                Some(PurchaseOutcome::AlreadyOwned) | None => {
                    println!("{}", game.frame().status_line());
                }
            }
            game.close_shop();
        }
        Command::Reset => {
            let mut game = UmbrellaGame::new(store, Haptics::default(), tuning, 0);
            game.request_reset();
            game.confirm_reset();
            println!("Progress reset");
        }
        Command::Settings {
            language,
            theme,
            haptics,
            system_dark,
        } => {
            let mut game = UmbrellaGame::new(store, Haptics::default(), tuning, 0);
            if language.is_some() || theme.is_some() || haptics.is_some() {
                let current = game.settings().clone();
                game.update_settings(Settings {
                    language: language.unwrap_or(current.language),
                    theme: theme.unwrap_or(current.theme),
                    haptics: haptics.unwrap_or(current.haptics),
                });
            }
            let settings = game.settings();
            let hour = chrono::Local::now().hour();
            let look = if settings.theme.is_dark(system_dark, hour) {
                "dark"
            } else {
                "light"
            };
            println!("Language: {}", settings.language);
            println!("Theme:    {} ({} now)", settings.theme, look);
            println!("Haptics:  {}", if settings.haptics { "on" } else { "off" });
        }
        Command::Cities { action } => {
            let mut store = store;
            cities_command(store.as_mut(), action)?;
        }
        Command::Birthdays { action } => {
            let mut store = store;
            birthdays_command(store.as_mut(), action)?;
        }
    }
    Ok(())
}

fn play(game: &mut UmbrellaGame, games: u32, seed: u64, skill: f64) {
    let step = game.tuning().step_ms;
    let mut bot = Autopilot::new(seed ^ 0x5eed, skill);

    for round in 1..=games {
        game.start_game();
        let mut elapsed = 0;
        while !game.state().is_game_over() && elapsed < MAX_RUN_MS {
            let input = bot.decide(game.state(), step);
            game.tick(&input);
            elapsed += step;
            if elapsed % 1000 < step {
                log::debug!("{}", game.frame().status_line());
            }
        }
        if !game.state().is_game_over() {
            log::info!("Run {} cut off after {}s", round, MAX_RUN_MS / 1000);
        }
        let frame = game.frame();
        println!(
            "Game {round}: score {} (best {}), coins {}",
            frame.score, frame.high_score, frame.total_coins
        );
        game.restart_game();
    }
}

fn cities_command(
    store: &mut dyn KeyValueStore,
    action: CityCommand,
) -> Result<(), Box<dyn Error>> {
    match action {
        CityCommand::List => {
            let favorites = preferences::favorite_cities(store)?;
            println!("Favorites: {}", favorites.join(", "));
            let recent: Vec<String> = preferences::recent_cities(store)?
                .into_iter()
                .map(|city| {
                    if favorites.contains(&city) {
                        format!("{city} *")
                    } else {
                        city
                    }
                })
                .collect();
            println!("Recent:    {}", recent.join(", "));
        }
        CityCommand::Favorite { city } => {
            if preferences::toggle_favorite(store, &city)? {
                println!("Added {city} to favorites");
            } else {
                println!("{city} is not a favorite");
            }
        }
        CityCommand::Search { city } => {
            let recent = preferences::add_recent_city(store, &city)?;
            if preferences::is_favorite(store, &city)? {
                println!("{city} is a favorite");
            }
            println!("Recent: {}", recent.join(", "));
        }
        CityCommand::Suggest { input } => {
            let recent = preferences::recent_cities(store)?;
            let favorites = preferences::favorite_cities(store)?;
            for city in preferences::suggestions(&recent, &favorites, &input) {
                println!("{city}");
            }
        }
    }
    Ok(())
}

fn birthdays_command(
    store: &mut dyn KeyValueStore,
    action: BirthdayCommand,
) -> Result<(), Box<dyn Error>> {
    match action {
        BirthdayCommand::List => {
            let today = chrono::Local::now().date_naive();
            let upcoming = birthdays::upcoming(store, today)?;
            if upcoming.is_empty() {
                println!("No birthdays saved");
            }
            for (birthday, days) in upcoming {
                let when = match days {
                    0 => "today".to_string(),
                    1 => "tomorrow".to_string(),
                    n => format!("in {n} days"),
                };
                println!("{}  {}  {} ({})", birthday.id, birthday.date, birthday.name, when);
            }
        }
        BirthdayCommand::Add { id, name, date } => {
            birthdays::add(store, Birthday::parse(&id, &name, &date)?)?;
            println!("Saved {name}");
        }
        BirthdayCommand::Remove { id } => {
            if birthdays::remove(store, &id)? {
                println!("Removed {id}");
            } else {
                println!("No birthday with id {id}");
            }
        }
        BirthdayCommand::Clear => {
            birthdays::clear(store)?;
            println!("All birthdays removed");
        }
    }
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x00c0_ffee)
}
