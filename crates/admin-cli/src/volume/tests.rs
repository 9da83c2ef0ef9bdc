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

// The intent of the tests.rs file is to test the integrity of the
// command, including things like basic structure parsing, enum
// translations, and any external input validators that are
// configured. Specific "categories" are:
//
// Command Structure - Baseline debug_assert() of the entire command.
// Argument Parsing  - Ensure required/optional arg combinations parse correctly.

use clap::{CommandFactory, Parser};

use super::*;

// verify_cmd_structure runs a baseline clap debug_assert()
// to do basic command configuration checking and validation.
#[test]
fn verify_cmd_structure() {
    Cmd::command().debug_assert();
}

/////////////////////////////////////////////////////////////////////////////
// Argument Parsing
//
// This section contains tests specific to argument parsing,
// including testing required arguments, as well as optional
// flag-specific checking.

// parse_list ensures list parses with no arguments.
#[test]
fn parse_list() {
    let cmd = Cmd::try_parse_from(["volume", "list"]).expect("should parse list");
    assert!(matches!(cmd, Cmd::List(_)));
}

// parse_find ensures find parses with --name.
#[test]
fn parse_find() {
    let cmd = Cmd::try_parse_from(["volume", "find", "--name", "data"]).expect("should parse find");

    match cmd {
        Cmd::Find(args) => assert_eq!(args.name, "data"),
        _ => panic!("expected Find variant"),
    }
}

// parse_attach ensures attach parses the volume and the
// virtual machine.
#[test]
fn parse_attach() {
    let cmd = Cmd::try_parse_from(["volume", "attach", "-n", "data", "-v", "web"])
        .expect("should parse attach");

    match cmd {
        Cmd::Attach(args) => {
            assert_eq!(args.name, "data");
            assert_eq!(args.vm, "web");
        }
        _ => panic!("expected Attach variant"),
    }
}

// parse_attach_requires_vm ensures attach fails without --vm.
#[test]
fn parse_attach_requires_vm() {
    let result = Cmd::try_parse_from(["volume", "attach", "--name", "data"]);
    assert!(result.is_err(), "should fail without vm");
}

// parse_detach ensures detach parses with --name.
#[test]
fn parse_detach() {
    let cmd =
        Cmd::try_parse_from(["volume", "detach", "--name", "data"]).expect("should parse detach");

    match cmd {
        Cmd::Detach(args) => assert_eq!(args.name, "data"),
        _ => panic!("expected Detach variant"),
    }
}
