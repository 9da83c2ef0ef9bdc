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
use kahuna_infra_api::model::MachineQuery;
use kahuna_onboarding::ProvisioningRequest;

use super::common::Selection;
use super::*;

// verify_cmd_structure runs a baseline clap debug_assert()
// to do basic command configuration checking and validation,
// ensuring things like unique argument definitions, group
// configurations, argument references, etc. Things that would
// otherwise be missed until runtime.
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

// parse_check_by_name ensures check parses with --name.
#[test]
fn parse_check_by_name() {
    let cmd = Cmd::try_parse_from(["machine", "check", "--name", "nodo1"])
        .expect("should parse check by name");

    match cmd {
        Cmd::Check(args) => {
            assert_eq!(
                Selection::from_args(args.name, args.host),
                Selection::One(MachineQuery::Name("nodo1".to_string()))
            );
        }
        _ => panic!("expected Check variant"),
    }
}

// parse_check_all ensures check parses with -a.
#[test]
fn parse_check_all() {
    let cmd = Cmd::try_parse_from(["machine", "check", "-a"]).expect("should parse check all");

    match cmd {
        Cmd::Check(args) => {
            assert!(args.all);
            assert_eq!(Selection::from_args(args.name, args.host), Selection::All);
        }
        _ => panic!("expected Check variant"),
    }
}

// parse_check_requires_selector ensures check fails without
// any of --name, --host or --all.
#[test]
fn parse_check_requires_selector() {
    let result = Cmd::try_parse_from(["machine", "check"]);
    assert!(result.is_err(), "should fail without selector");
}

// parse_check_selectors_conflict ensures only one selector
// can be given.
#[test]
fn parse_check_selectors_conflict() {
    let result = Cmd::try_parse_from(["machine", "check", "--name", "nodo1", "--all"]);
    assert!(result.is_err(), "should fail with two selectors");
}

// parse_create_minimal ensures create parses with only --host.
#[test]
fn parse_create_minimal() {
    let cmd = Cmd::try_parse_from(["machine", "create", "--host", "10.60.1.120"])
        .expect("should parse create");

    match cmd {
        Cmd::Create(args) => {
            let request = ProvisioningRequest::from(args);
            assert_eq!(request, ProvisioningRequest::for_host("10.60.1.120"));
        }
        _ => panic!("expected Create variant"),
    }
}

// parse_create_all_options ensures create parses every
// long option.
#[test]
fn parse_create_all_options() {
    let cmd = Cmd::try_parse_from([
        "machine",
        "create",
        "--host",
        "10.60.1.120",
        "--user",
        "root",
        "--psswd",
        "temporal",
        "--type",
        "XENSERVER",
        "--rsip",
        "10.60.1.4",
        "--datastore",
        "ds1",
        "--vswitch",
        "eth1",
    ])
    .expect("should parse create with options");

    match cmd {
        Cmd::Create(args) => {
            assert_eq!(args.password.as_deref(), Some("temporal"));
            assert_eq!(args.hypervisor_type.as_deref(), Some("XENSERVER"));
            assert_eq!(args.remote_services_ip.as_deref(), Some("10.60.1.4"));
            assert_eq!(args.virtual_switch.as_deref(), Some("eth1"));
        }
        _ => panic!("expected Create variant"),
    }
}

// parse_create_requires_host ensures create fails without --host.
#[test]
fn parse_create_requires_host() {
    let result = Cmd::try_parse_from(["machine", "create", "--user", "root"]);
    assert!(result.is_err(), "should fail without host");
}

// parse_delete_by_host ensures delete parses with -i.
#[test]
fn parse_delete_by_host() {
    let cmd = Cmd::try_parse_from(["machine", "delete", "-i", "10.0.0.1"])
        .expect("should parse delete");

    match cmd {
        Cmd::Delete(args) => {
            assert_eq!(args.host.as_deref(), Some("10.0.0.1"));
            assert!(!args.all);
        }
        _ => panic!("expected Delete variant"),
    }
}

// parse_list ensures list parses with no arguments.
#[test]
fn parse_list() {
    let cmd = Cmd::try_parse_from(["machine", "list"]).expect("should parse list");
    assert!(matches!(cmd, Cmd::List(_)));
}

// parse_datastores_show ensures datastores parses without
// a toggle.
#[test]
fn parse_datastores_show() {
    let cmd = Cmd::try_parse_from(["machine", "datastores", "--all"])
        .expect("should parse datastores");

    match cmd {
        Cmd::Datastores(args) => assert!(args.toggle().is_none()),
        _ => panic!("expected Datastores variant"),
    }
}

// parse_datastores_disable ensures a datastore can be
// disabled on a single machine.
#[test]
fn parse_datastores_disable() {
    let cmd = Cmd::try_parse_from([
        "machine",
        "datastores",
        "--host",
        "10.0.0.1",
        "--datastore",
        "uuid-ds1",
        "--disable",
    ])
    .expect("should parse datastores disable");

    match cmd {
        Cmd::Datastores(args) => assert_eq!(args.toggle(), Some(("uuid-ds1", false))),
        _ => panic!("expected Datastores variant"),
    }
}

// parse_datastores_toggle_needs_datastore ensures --enable
// is rejected without --datastore.
#[test]
fn parse_datastores_toggle_needs_datastore() {
    let result = Cmd::try_parse_from(["machine", "datastores", "--name", "nodo1", "--enable"]);
    assert!(result.is_err(), "should fail without datastore");
}

// parse_datastores_needs_toggle ensures --datastore is
// rejected without --enable or --disable.
#[test]
fn parse_datastores_needs_toggle() {
    let result = Cmd::try_parse_from(["machine", "datastores", "--name", "nodo1", "-d", "ds1"]);
    assert!(result.is_err(), "should fail without enable or disable");
}

// parse_datastores_enable_disable_conflict ensures --enable
// and --disable can not be given together.
#[test]
fn parse_datastores_enable_disable_conflict() {
    let result = Cmd::try_parse_from([
        "machine",
        "datastores",
        "--name",
        "nodo1",
        "-d",
        "ds1",
        "--enable",
        "--disable",
    ]);
    assert!(result.is_err(), "should fail with enable and disable");
}

// parse_datastores_toggle_on_all_rejected ensures toggling is
// limited to a single machine.
#[test]
fn parse_datastores_toggle_on_all_rejected() {
    let result = Cmd::try_parse_from(["machine", "datastores", "--all", "-d", "ds1", "--enable"]);
    assert!(result.is_err(), "should fail with all and datastore");
}
