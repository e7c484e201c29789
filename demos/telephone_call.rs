//! Telephone Call
//!
//! This example drives a phone call through a hierarchical state machine.
//!
//! Key concepts:
//! - OnHold is a substate of Connected, so it inherits LeftMessage and
//!   the microphone controls
//! - Moving between Connected and OnHold does not restart the call timer
//! - CallDialed carries the callee, SetVolume carries the level
//! - Triggers the current state cannot handle are reported and skipped
//!
//! Run with: cargo run --example telephone_call
//! Set RUST_LOG=switchboard=debug to see the engine's own logging.

use std::error::Error;
use switchboard::core::{State, Trigger};
use switchboard::{
    state_enum, trigger_enum, FireError, StateMachine, TriggerWithParameters,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

state_enum! {
    enum Call {
        OffHook,
        Ringing,
        Connected,
        OnHold,
        PhoneDestroyed,
    }
}

trigger_enum! {
    enum Event {
        CallDialed,
        CallConnected,
        LeftMessage,
        PlacedOnHold,
        TakenOffHold,
        PhoneHurledAgainstWall,
        MuteMicrophone,
        UnmuteMicrophone,
        SetVolume,
    }
}

/// A call whose invalid requests are reported instead of failing.
struct PhoneCall {
    machine: StateMachine<Call, Event>,
    dial: TriggerWithParameters<Event, (String,)>,
    set_volume: TriggerWithParameters<Event, (i32,)>,
}

impl PhoneCall {
    fn new() -> Result<Self, Box<dyn Error>> {
        let mut machine = StateMachine::new(Call::OffHook);
        let dial = machine.set_trigger_parameters::<(String,)>(Event::CallDialed)?;
        let set_volume = machine.set_trigger_parameters::<(i32,)>(Event::SetVolume)?;

        machine
            .configure(Call::OffHook)
            .permit(Event::CallDialed, Call::Ringing)?;

        machine
            .configure(Call::Ringing)
            .on_entry_from(&dial, |(callee,), _| println!("  Ringing {callee}"))?
            .permit(Event::CallConnected, Call::Connected)?;

        machine
            .configure(Call::Connected)
            .on_entry(|t| println!("  Call timer started at {}", t.timestamp.format("%H:%M:%S")))
            .on_exit(|t| println!("  Call timer stopped at {}", t.timestamp.format("%H:%M:%S")))
            .internal_transition(Event::MuteMicrophone, |_| println!("  Microphone muted"))?
            .internal_transition(Event::UnmuteMicrophone, |_| println!("  Microphone unmuted"))?
            .internal_transition_with(&set_volume, |(level,), _| {
                println!("  Volume set to {level}")
            })?
            .permit(Event::LeftMessage, Call::OffHook)?
            .permit(Event::PlacedOnHold, Call::OnHold)?;

        machine
            .configure(Call::OnHold)
            .substate_of(Call::Connected)?
            .permit(Event::TakenOffHold, Call::Connected)?
            .permit(Event::PhoneHurledAgainstWall, Call::PhoneDestroyed)?;

        machine.on_transitioned(|t| {
            println!(
                "  [{}] {} -> {}",
                t.trigger.name(),
                t.source.name(),
                t.destination.name()
            )
        });

        Ok(Self {
            machine,
            dial,
            set_volume,
        })
    }

    fn dial(&mut self, callee: &str) -> Result<(), FireError> {
        let result = self.machine.fire_with(&self.dial, (callee.to_string(),));
        Self::tolerate(result)
    }

    fn set_volume(&mut self, level: i32) -> Result<(), FireError> {
        let result = self.machine.fire_with(&self.set_volume, (level,));
        Self::tolerate(result)
    }

    fn fire(&mut self, event: Event) -> Result<(), FireError> {
        let result = self.machine.fire(event);
        Self::tolerate(result)
    }

    fn tolerate(result: Result<(), FireError>) -> Result<(), FireError> {
        match result {
            Err(error @ FireError::InvalidTransition { .. }) => {
                println!("  Ignored: {error}");
                Ok(())
            }
            other => other,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    println!("=== Telephone Call State Machine ===\n");

    let mut call = PhoneCall::new()?;
    println!("Initial state: {}\n", call.machine.state().name());

    println!("Dialing:");
    call.dial("Prameela")?;
    call.fire(Event::CallConnected)?;

    println!("\nTalking:");
    call.set_volume(2)?;
    call.fire(Event::MuteMicrophone)?;
    call.fire(Event::UnmuteMicrophone)?;

    println!("\nHolding (timer keeps running):");
    call.fire(Event::PlacedOnHold)?;
    call.fire(Event::MuteMicrophone)?;
    call.fire(Event::TakenOffHold)?;
    call.set_volume(11)?;

    println!("\nFrustration:");
    call.fire(Event::PlacedOnHold)?;
    call.fire(Event::PhoneHurledAgainstWall)?;
    call.fire(Event::TakenOffHold)?;

    println!("\nFinal state: {}", call.machine.state().name());

    println!("\nTopology:");
    println!("{}", call.machine.describe().to_json_pretty()?);

    println!("\n=== Example Complete ===");
    Ok(())
}
