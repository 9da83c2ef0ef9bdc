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

//! Procedural macros for the kahuna command line.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Variant};

/// Generates the `Dispatch` impl of a command enum.
///
/// Every variant must wrap exactly one value. Plain variants wrap
/// arguments implementing `Run` and are run against the runtime context.
/// Variants marked `#[dispatch]` wrap a nested command group which is
/// dispatched in turn.
///
/// ```ignore
/// #[derive(Parser, Debug, Dispatch)]
/// pub enum Cmd {
///     Check(check::Args),
///     #[dispatch]
///     Datastore(datastores::Cmd),
/// }
/// ```
#[proc_macro_derive(Dispatch, attributes(dispatch))]
pub fn derive_dispatch(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand_dispatch(input) {
        Ok(ts) => ts.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand_dispatch(input: DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Dispatch can only be derived for enums",
        ));
    };

    let mut arms = Vec::with_capacity(data.variants.len());
    let mut nested = false;
    for variant in &data.variants {
        check_single_field(variant)?;
        let variant_name = &variant.ident;
        if variant.attrs.iter().any(|a| a.path().is_ident("dispatch")) {
            nested = true;
            arms.push(quote! {
                #name::#variant_name(cmd) => cmd.dispatch(ctx).await,
            });
        } else {
            arms.push(quote! {
                #name::#variant_name(args) => args.run(&mut ctx).await,
            });
        }
    }

    let dispatch_import = nested.then(|| quote! { use crate::cfg::dispatch::Dispatch as _; });

    Ok(quote! {
        impl crate::cfg::dispatch::Dispatch for #name {
            #[allow(unused_mut)]
            async fn dispatch(
                self,
                mut ctx: crate::cfg::runtime::RuntimeContext,
            ) -> crate::error::CliResult<()> {
                #[allow(unused_imports)]
                use crate::cfg::run::Run;
                #dispatch_import
                match self {
                    #(#arms)*
                }
            }
        }
    })
}

fn check_single_field(variant: &Variant) -> syn::Result<()> {
    match &variant.fields {
        Fields::Unnamed(fields) if fields.unnamed.len() == 1 => Ok(()),
        _ => Err(syn::Error::new_spanned(
            variant,
            "Dispatch variants must wrap exactly one value",
        )),
    }
}
