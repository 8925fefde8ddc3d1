// Flowcap: Reactive Shortest-Path Flow Provisioning
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Replay a canned notification scenario against the controller and print the transcript of
//! notifications and resulting commands.

use clap::{Parser, ValueEnum};
use flowcap::channel::CommandLog;
use flowcap::printer;
use flowcap::Controller;
use log::*;

mod example_scenarios;
use example_scenarios::*;

#[derive(Parser)]
#[command(about = "Replay a scenario against the flowcap controller")]
struct CommandLineArguments {
    /// The scenario to replay
    #[arg(value_enum)]
    scenario: Scenario,
    /// Suppress the transcript, print only the summary
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Scenario {
    /// Two switches, one link: flood, then learn, then forward along the installed path
    Pair,
    /// Four-switch ring: the hosts settle on the deterministic two-hop route
    Ring,
    /// The ring, partitioned after learning: the last packet must be flooded
    Partition,
}

fn main() {
    pretty_env_logger::init();
    let args = CommandLineArguments::parse();

    let script = match args.scenario {
        Scenario::Pair => pair(),
        Scenario::Ring => ring(),
        Scenario::Partition => partition(),
    };
    info!("replaying {:?} with {} notifications", args.scenario, script.len());

    let mut controller = Controller::new(CommandLog::new());
    for notification in script {
        if !args.quiet {
            println!("<- {}", printer::notification(&notification));
        }
        controller.handle(notification);
        for command in controller.sink_mut().take() {
            if !args.quiet {
                println!("   -> {}", printer::command(&command));
            }
        }
    }

    println!(
        "done: {} switches, {} links, {} hosts learned",
        controller.topology().num_switches(),
        controller.topology().num_links(),
        controller.hosts().len()
    );
}
