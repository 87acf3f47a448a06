use clap::Parser;
use core::cell::RefCell;
use dpr_core::mk_static;
use dpr_core::utils::{BusEvent, EVENT_CHANNEL, Glyph, StatusDisplay, SystemController};
use embassy_executor::{Executor, Spawner};
use embassy_time::{Duration, Timer};
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::i2c::{self, ErrorKind, I2c, NoAcknowledgeSource, Operation};
use static_cell::StaticCell;
use std::convert::Infallible;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

#[derive(Parser)]
#[clap(version = "1.0")]
struct Opts {
    /// File with one JSON event per line (`{"source":1104,"value":1}`); stdin when omitted
    #[clap(long)]
    script: Option<PathBuf>,
    /// Delay between scripted events in milliseconds
    #[clap(long, default_value_t = 250)]
    interval_ms: u64,
    /// Motor speed for every run command
    #[clap(long)]
    speed: Option<u8>,
    /// NACK every I2C write
    #[clap(long)]
    fail_i2c: bool,
}

/// I2C bus that logs every write to the console.
struct ConsoleI2c {
    fail: bool,
}

impl i2c::ErrorType for ConsoleI2c {
    type Error = ErrorKind;
}

impl I2c for ConsoleI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for op in operations.iter() {
            if let Operation::Write(bytes) = op {
                info!("I2C 0x{:02X} <- {:02X?}", address, bytes);
            }
        }
        if self.fail {
            Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))
        } else {
            Ok(())
        }
    }
}

/// GPIO output that logs level changes.
struct ConsolePin {
    pin: u8,
}

impl digital::ErrorType for ConsolePin {
    type Error = Infallible;
}

impl OutputPin for ConsolePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        info!("P{} -> low", self.pin);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        info!("P{} -> high", self.pin);
        Ok(())
    }
}

/// Display that logs glyphs instead of lighting a matrix.
struct ConsoleDisplay;

impl StatusDisplay for ConsoleDisplay {
    type Error = Infallible;

    fn print(
        &mut self,
        glyph: Glyph,
    ) -> Result<(), Self::Error> {
        info!("display: {}", glyph.as_char());
        Ok(())
    }

    fn scroll(
        &mut self,
        text: &str,
    ) -> Result<(), Self::Error> {
        info!("display scroll: {}", text);
        Ok(())
    }
}

type Controller = SystemController<'static, ConsoleI2c, ConsoleDisplay, ConsolePin>;

#[embassy_executor::task]
async fn event_task(mut ctrl: Controller) -> ! {
    ctrl.boot();
    ctrl.event_ch().await
}

/// Stands in for the radio: replays scripted events onto the bus.
#[embassy_executor::task]
async fn radio_task(
    script: String,
    interval: Duration,
) {
    for (n, line) in script.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match BusEvent::from_json_slice(line.as_bytes()) {
            Ok(event) => {
                EVENT_CHANNEL.send(event).await;
                Timer::after(interval).await;
            }
            Err(e) => warn!(line = n + 1, %e, "skipping malformed event"),
        }
    }
    info!("event script exhausted, idling");
}

#[embassy_executor::task]
async fn main_task(
    spawner: Spawner,
    opts: Opts,
    script: String,
) {
    let i2c_bus = &*mk_static!(
        RefCell<ConsoleI2c>,
        RefCell::new(ConsoleI2c {
            fail: opts.fail_i2c
        })
    );

    let ctrl = SystemController::new(
        i2c_bus,
        ConsoleDisplay,
        ConsolePin { pin: 8 },
        ConsolePin { pin: 12 },
        opts.speed,
    );
    spawner.spawn(event_task(ctrl)).unwrap();

    let interval = Duration::from_millis(opts.interval_ms);
    spawner.spawn(radio_task(script, interval)).unwrap();
}

fn load_script(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut script = String::new();
            std::io::stdin().read_to_string(&mut script)?;
            Ok(script)
        }
    }
}

static EXECUTOR: StaticCell<Executor> = StaticCell::new();

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let opts: Opts = Opts::parse();
    let script = match load_script(opts.script.as_deref()) {
        Ok(script) => script,
        Err(e) => {
            error!(%e, "cannot read event script");
            std::process::exit(1);
        }
    };

    let executor = EXECUTOR.init(Executor::new());
    executor.run(|spawner| {
        spawner.spawn(main_task(spawner, opts, script)).unwrap();
    });
}
