use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, FnArg, ItemFn, LitInt, Pat, Signature};

/// Time a system when the `perf_stats` feature of the calling crate is enabled.
///
/// The body is wrapped in a guard that logs the elapsed time through
/// `bevy::prelude::info!` when the function returns. Without `perf_stats`
/// the guard is compiled out entirely.
///
/// A system that takes `tick: Res<SimTick>` additionally reports once every
/// 100 ticks, regardless of how long it took.
///
/// ```ignore
/// #[profile]
/// pub fn follow_path(query: Query<&Patron>, tick: Res<SimTick>) { /* ... */ }
///
/// #[profile(4)] // only report runs slower than 4ms
/// pub fn move_and_slide(query: Query<&mut SimPosition>) { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn profile(attr: TokenStream, item: TokenStream) -> TokenStream {
    let threshold_ms: u128 = if attr.is_empty() {
        1
    } else {
        let lit = parse_macro_input!(attr as LitInt);
        match lit.base10_parse() {
            Ok(ms) => ms,
            Err(err) => return err.to_compile_error().into(),
        }
    };

    let ItemFn { attrs, vis, sig, block } = parse_macro_input!(item as ItemFn);
    let name = sig.ident.to_string();

    let tick_value = if takes_sim_tick(&sig) {
        quote! { ::core::option::Option::Some(tick.0) }
    } else {
        quote! { ::core::option::Option::None }
    };

    let guard = profile_guard(&name, threshold_ms, tick_value);

    let expanded = quote! {
        #(#attrs)*
        #vis #sig {
            #[cfg(feature = "perf_stats")]
            let _profile_guard = { #guard };

            #block
        }
    };

    expanded.into()
}

/// True when the signature has a parameter named `tick` whose type mentions `SimTick`.
fn takes_sim_tick(sig: &Signature) -> bool {
    sig.inputs.iter().any(|arg| {
        let FnArg::Typed(typed) = arg else { return false };
        let Pat::Ident(ident) = &*typed.pat else { return false };
        if ident.ident != "tick" {
            return false;
        }
        let ty = &typed.ty;
        quote!(#ty).to_string().contains("SimTick")
    })
}

fn profile_guard(name: &str, threshold_ms: u128, tick_value: TokenStream2) -> TokenStream2 {
    quote! {
        struct ProfileGuard {
            name: &'static str,
            start: ::std::time::Instant,
            tick: ::core::option::Option<u64>,
        }

        impl ::core::ops::Drop for ProfileGuard {
            fn drop(&mut self) {
                let elapsed = self.start.elapsed();
                let periodic = matches!(self.tick, ::core::option::Option::Some(t) if t % 100 == 0);
                if elapsed.as_millis() > #threshold_ms || periodic {
                    bevy::prelude::info!("[PERF] {}: {:?}", self.name, elapsed);
                }
            }
        }

        ProfileGuard {
            name: #name,
            start: ::std::time::Instant::now(),
            tick: #tick_value,
        }
    }
}
