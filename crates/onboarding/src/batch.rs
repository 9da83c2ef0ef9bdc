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

//! Per-item outcomes of operations applied to many machines.

use crate::error::OnboardingError;

#[derive(Debug)]
pub struct BatchItem<T> {
    pub label: String,
    pub result: Result<T, OnboardingError>,
}

/// Outcomes in the order the items were processed.
#[derive(Debug)]
pub struct BatchReport<T = ()> {
    items: Vec<BatchItem<T>>,
}

impl<T> Default for BatchReport<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> BatchReport<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn succeeded(&mut self, label: impl Into<String>, value: T) {
        self.items.push(BatchItem {
            label: label.into(),
            result: Ok(value),
        });
    }

    pub fn failed(&mut self, label: impl Into<String>, err: OnboardingError) {
        self.items.push(BatchItem {
            label: label.into(),
            result: Err(err),
        });
    }

    pub fn items(&self) -> &[BatchItem<T>] {
        &self.items
    }

    pub fn successes(&self) -> impl Iterator<Item = (&str, &T)> {
        self.items
            .iter()
            .filter_map(|i| i.result.as_ref().ok().map(|v| (i.label.as_str(), v)))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &OnboardingError)> {
        self.items
            .iter()
            .filter_map(|i| i.result.as_ref().err().map(|e| (i.label.as_str(), e)))
    }

    pub fn success_count(&self) -> usize {
        self.successes().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_success(&self) -> bool {
        self.failure_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_keep_order() {
        let mut report = BatchReport::new();
        report.succeeded("a", 1);
        report.failed("b", OnboardingError::not_found("gone"));
        report.succeeded("c", 3);

        assert_eq!(report.success_count(), 2);
        assert_eq!(report.failure_count(), 1);
        assert!(!report.is_success());
        let labels: Vec<_> = report.items().iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["a", "b", "c"]);
        assert_eq!(report.failures().next().map(|(l, _)| l), Some("b"));
    }

    #[test]
    fn test_empty_report_is_success() {
        let report: BatchReport = BatchReport::new();
        assert!(report.is_empty());
        assert!(report.is_success());
    }
}
