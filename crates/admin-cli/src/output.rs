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

//! Printing of command results.

use clap::ValueEnum;
use kahuna_onboarding::BatchReport;
use prettytable::{Cell, Row, Table};
use serde::Serialize;

use crate::error::CliResult;

#[derive(PartialEq, Eq, ValueEnum, Clone, Copy, Debug)]
#[clap(rename_all = "kebab_case")]
pub enum OutputFormat {
    AsciiTable,
    Json,
}

/// Something printable as a table row.
pub trait TableRow: Serialize {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

pub fn build_table<R: TableRow>(rows: &[R]) -> Table {
    let mut table = Table::new();
    table.set_titles(Row::new(
        R::HEADERS.iter().copied().map(Cell::new).collect::<Vec<Cell>>(),
    ));
    for row in rows {
        table.add_row(Row::new(
            row.cells().iter().map(|c| Cell::new(c)).collect::<Vec<Cell>>(),
        ));
    }
    table
}

pub fn print_rows<R: TableRow>(rows: &[R], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::AsciiTable => {
            build_table(rows).printstd();
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(rows)?);
        }
    }
    Ok(())
}

/// One line per item followed by a summary.
pub fn batch_lines<T>(report: &BatchReport<T>, verb: &str) -> Vec<String> {
    let mut lines: Vec<String> = report
        .items()
        .iter()
        .map(|item| match &item.result {
            Ok(_) => format!("{}: {verb}", item.label),
            Err(err) => format!("{}: error: {err}", item.label),
        })
        .collect();
    lines.push(format!(
        "{} {verb}, {} failed",
        report.success_count(),
        report.failure_count()
    ));
    lines
}

pub fn print_batch<T>(report: &BatchReport<T>, verb: &str) {
    for line in batch_lines(report, verb) {
        println!("{line}");
    }
}
