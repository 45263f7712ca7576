//! Headless session runner.
//!
//! Reads text commands from stdin and prints new combat log lines while the
//! session clock drives auto-battle, rest, and online time.

use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use skirmish::core::commands::parse_command;
use skirmish::persistence::SnapshotStore;
use skirmish::{GameConfig, GameStore, SaveManager};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

const LOOP_INTERVAL_MS: u64 = 100;

const USAGE: &str = "usage: skirmish [--seed N] [--ticks N] [--save PATH]";

const HELP: &str = "\
commands:
  spawn | attack | cast <skill_id>
  equip <inv#> | unequip <slot> | learn <skill_id> | forget <skill_id>
  stage <n> | next | advance on|off
  auto on|off | rest | revive
  decompose <inv#> | salvage <quality 0-5> [max_level]
  autodecompose off | autodecompose <quality 0-5> [max_level]
  strengthen <slot> | checkin | claim | reset
  status | inventory | skills | help | quit";

#[derive(Debug, Default)]
struct Args {
    seed: Option<u64>,
    ticks: Option<u64>,
    save: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    while let Some(flag) = args.next() {
        let mut value = || args.next().ok_or_else(|| format!("{} needs a value", flag));
        match flag.as_str() {
            "--seed" => {
                let raw = value()?;
                parsed.seed = Some(raw.parse().map_err(|_| format!("bad seed: {}", raw))?);
            }
            "--ticks" => {
                let raw = value()?;
                parsed.ticks = Some(raw.parse().map_err(|_| format!("bad tick count: {}", raw))?);
            }
            "--save" => parsed.save = Some(PathBuf::from(value()?)),
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(parsed)
}

fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn print_status<S: SnapshotStore>(store: &GameStore<StdRng, S>) {
    let state = store.snapshot();
    let stats = store.stats();
    println!(
        "Lv {} ({}/{} exp)  HP {}/{}  ATK {}  DEF {}  CRIT {:.1}%  CDMG {:.0}%",
        state.level,
        state.exp,
        state.exp_to_next,
        state.player_hp,
        stats.max_hp,
        stats.attack,
        stats.defense,
        stats.crit_rate,
        stats.crit_damage
    );
    println!(
        "Stage {} (max {})  boss {}/{}  auto-battle {}  auto-advance {}  stones {}",
        state.current_stage,
        state.max_stage_reached,
        state.boss_progress,
        store.config().monsters_per_boss,
        if state.auto_battle { "on" } else { "off" },
        if state.auto_advance { "on" } else { "off" },
        state.strengthen_stones
    );
    if state.resting {
        println!("Resting {:.1}/{:.1}", state.rest_progress, store.config().rest_duration);
    }
    if let Some(wave) = &state.wave {
        for enemy in wave.enemies.iter().filter(|e| e.is_alive()) {
            println!("  {} {}/{}", enemy.name(), enemy.hp, enemy.max_hp);
        }
    }
    if state.can_revive {
        println!("Revive available");
    }
    if let Some(reward) = &state.pending_offline {
        println!(
            "Offline rewards waiting: {} min, {} kills, {} exp (type 'claim')",
            reward.minutes, reward.kills, reward.exp
        );
    }
}

fn print_inventory<S: SnapshotStore>(store: &GameStore<StdRng, S>) {
    let state = store.snapshot();
    for (slot, item) in state.equipped.iter_equipped().map(|item| (item.slot, item)) {
        println!(
            "[{} +{}] {} ({} Lv{})",
            slot.name(),
            state.enhancements.level(slot),
            item.name,
            item.quality.name(),
            item.level
        );
    }
    for (index, item) in state.inventory.iter().enumerate() {
        println!(
            "{:>3}. {} ({} Lv{}) {}",
            index + 1,
            item.name,
            item.quality.name(),
            item.level,
            item.stat_contribution(1.0).summary()
        );
    }
}

fn print_skills<S: SnapshotStore>(store: &GameStore<StdRng, S>) {
    let state = store.snapshot();
    for (id, count) in &state.owned_skills {
        let equipped = if state.equipped_skills.contains(id) { "*" } else { " " };
        let cooldown = state.cooldowns.get(id).copied().unwrap_or(0);
        println!("{} {} x{} (cooldown {})", equipped, id, count, cooldown);
    }
}

fn main() {
    init_logging();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("{}", USAGE);
            process::exit(2);
        }
    };

    let mut config = GameConfig::from_env();
    if let Some(path) = args.save {
        config.save_path = Some(path);
    }
    let storage = match &config.save_path {
        Some(path) => SaveManager::with_path(path.clone()),
        None => match SaveManager::new() {
            Ok(manager) => manager,
            Err(e) => {
                eprintln!("Failed to set up save directory: {}", e);
                process::exit(1);
            }
        },
    };
    tracing::info!(path = %storage.path().display(), "using save file");

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut store = GameStore::open(config, storage, rng, Local::now());
    print_status(&store);

    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let interval = Duration::from_millis(LOOP_INTERVAL_MS);
    let mut last_tick = Instant::now();
    let mut printed = store.snapshot().combat_log.pushed();
    let mut loops = 0u64;
    let mut input_open = true;

    'session: loop {
        let wait = interval.saturating_sub(last_tick.elapsed());
        let received = if input_open {
            rx.recv_timeout(wait)
        } else {
            thread::sleep(wait);
            Err(RecvTimeoutError::Timeout)
        };

        match received {
            Ok(line) => {
                let line = line.trim();
                match line {
                    "" => {}
                    "quit" | "exit" => break 'session,
                    "status" => print_status(&store),
                    "inventory" | "inv" => print_inventory(&store),
                    "skills" => print_skills(&store),
                    "help" => println!("{}", HELP),
                    _ => match parse_command(line, store.snapshot()) {
                        Some(command) => {
                            store.dispatch(command, Local::now());
                        }
                        None => println!("Unknown command: {} (try 'help')", line),
                    },
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                input_open = false;
                if args.ticks.is_none() {
                    break 'session;
                }
            }
        }

        if last_tick.elapsed() >= interval {
            let elapsed = last_tick.elapsed().as_millis() as u64;
            last_tick = Instant::now();
            store.advance(elapsed, Local::now());
            loops += 1;
            if args.ticks.is_some_and(|max| loops >= max) {
                break 'session;
            }
        }

        let log = &store.snapshot().combat_log;
        let fresh = log.pushed().saturating_sub(printed) as usize;
        for line in log.tail(fresh) {
            println!("{}", line);
        }
        printed = log.pushed();
    }

    print_status(&store);
    tracing::info!("session ended");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, String> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["--seed", "42", "--ticks", "10", "--save", "/tmp/s.dat"]).unwrap();
        assert_eq!(parsed.seed, Some(42));
        assert_eq!(parsed.ticks, Some(10));
        assert_eq!(parsed.save, Some(PathBuf::from("/tmp/s.dat")));
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(args(&["--seed"]).is_err());
        assert!(args(&["--seed", "x"]).is_err());
        assert!(args(&["--verbose"]).is_err());
        assert!(args(&[]).unwrap().seed.is_none());
    }
}
