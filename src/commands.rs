use anyhow::Result;
use log::{debug, info, warn};

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::command::{Command, HELP};
use crate::config::{ConfigData, OutputFormat};
use crate::error::RouletteError;
use crate::render::Renderer;
use crate::roulette::{Group, RouletteEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Data {
    pub engine: Arc<RwLock<RouletteEngine>>,
    pub renderer: Arc<dyn Renderer>,
    in_flight: Mutex<Option<JoinHandle<Option<Group>>>>,
}

impl Data {
    pub fn new(config: &ConfigData, renderer: Arc<dyn Renderer>) -> Self {
        let mut engine = match config.seed {
            Some(seed) => RouletteEngine::with_seed(seed),
            None => RouletteEngine::new(),
        };

        for name in &config.participants {
            if let Err(why) = engine.add_participant(name) {
                warn!("skipping configured participant: {why}");
            }
        }

        let sink = Arc::clone(&renderer);
        engine.on_change(Box::new(move |snapshot| sink.render(snapshot)));

        Self {
            engine: Arc::new(RwLock::new(engine)),
            renderer,
            in_flight: Mutex::new(None),
        }
    }

    pub async fn execute(&self, command: Command) -> Result<Flow, RouletteError> {
        match command {
            Command::Add(name) => {
                if !self.engine.write().await.add_participant(&name)? {
                    println!("Nothing to add");
                }
            }
            Command::Remove(name) => {
                if !self.engine.write().await.remove_participant(&name)? {
                    println!("{name} is not on the roster");
                }
            }
            Command::Spin => self.spin().await?,
            Command::Reset => {
                let mut engine = self.engine.write().await;
                if engine.can_reset() {
                    engine.reset_spins();
                } else {
                    println!("Nothing to reset yet");
                }
            }
            Command::Wait => {
                self.settle().await;
            }
            Command::Show => {
                let snapshot = self.engine.read().await.snapshot();
                self.renderer.render(&snapshot);
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Starts a spin and schedules its completion once the animation time
    /// has passed.
    pub async fn spin(&self) -> Result<(), RouletteError> {
        let ticket = self.engine.write().await.begin_spin()?;
        let deadline = Instant::now() + ticket.duration;
        let engine = Arc::clone(&self.engine);

        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            debug!("animation for spin {} finished", ticket.id);
            engine.write().await.complete_spin(ticket.id)
        });
        *self.in_flight.lock().await = Some(handle);
        Ok(())
    }

    /// Waits for the scheduled completion, if any.
    pub async fn settle(&self) -> Option<Group> {
        let handle = self.in_flight.lock().await.take()?;
        match handle.await {
            Ok(group) => group,
            Err(why) => {
                warn!("spin completion task failed: {why}");
                None
            }
        }
    }
}

pub async fn start() -> Result<()> {
    let config = ConfigData::from_env().await?;
    info!(
        "starting with {} configured participants, seed {:?}",
        config.participants.len(),
        config.seed
    );

    let data = Data::new(&config, Arc::from(config.output.renderer()));
    if config.output == OutputFormat::Text {
        println!("{HELP}");
    }
    data.execute(Command::Show).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(why) => {
                eprintln!("{why}");
                continue;
            }
        };

        match data.execute(command).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(why) => {
                debug!("command rejected: {why:?}");
                eprintln!("{why}");
            }
        }
    }

    // Let a spin that is still turning land before leaving.
    data.settle().await;
    info!("bye");
    Ok(())
}
