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

//! Scoped ownership of an authenticated API session.

use std::ops::Deref;

/// A resource holding server side session state that must be given back
/// when the command using it ends.
pub trait SessionResource {
    fn release(&self);
}

/// Guard owning an authenticated API client for the duration of one
/// command. The session is released when the guard is dropped, whatever
/// path the command took to get there.
pub struct Session<A: SessionResource> {
    api: A,
}

impl<A: SessionResource> Session<A> {
    pub fn new(api: A) -> Self {
        tracing::debug!("infrastructure API session acquired");
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}

impl<A: SessionResource> Deref for Session<A> {
    type Target = A;

    fn deref(&self) -> &A {
        &self.api
    }
}

impl<A: SessionResource> Drop for Session<A> {
    fn drop(&mut self) {
        self.api.release();
        tracing::debug!("infrastructure API session released");
    }
}
