/*
 * SPDX-FileCopyrightText: Copyright (c) 2026 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: Apache-2.0
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 * http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use clap::{CommandFactory, Parser};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, registry};

use crate::cfg::cli_options::CliOptions;
use crate::cfg::dispatch::Dispatch;
use crate::cfg::runtime::RuntimeContext;
use crate::error::CliResult;

mod cfg;
mod error;
mod machine;
mod output;
mod vm;
mod volume;

fn log_level(debug: u8) -> LevelFilter {
    match debug {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn init_log(debug: u8) -> color_eyre::Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level(debug).into())
        .from_env_lossy()
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?)
        .add_directive("rustls=warn".parse()?);

    registry()
        .with(fmt::Layer::default().compact().with_writer(std::io::stderr))
        .with(env_filter)
        .try_init()?;
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let options = CliOptions::parse();
    init_log(options.debug)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(options))?;
    Ok(())
}

async fn run(mut options: CliOptions) -> CliResult<()> {
    let Some(command) = options.commands.take() else {
        CliOptions::command().print_help()?;
        return Ok(());
    };
    let ctx = RuntimeContext::connect(&options).await?;
    command.dispatch(ctx).await
}
