//! Attribute macros for otest.
//!
//! - `#[suite]`: turns an inherent impl block into a `TestContainer` implementation. Every method
//!   marked `#[test_case]` becomes one sub-test, run in declaration order.

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{Attribute, FnArg, ImplItem, ItemImpl, LitStr, Meta, parse_macro_input};

/// Implements `otest::TestContainer` for the type of an inherent impl block.
///
/// Methods marked `#[test_case]` (optionally `#[test_case(tag = "...")]`) are registered as
/// sub-tests named after the method. They must take `self` by reference plus one
/// `&mut TestCase<'_>` argument, and return `TestResult`. Unmarked methods are left alone, so
/// helpers can live in the same block. The type itself must implement `Default`.
///
/// # Example
/// ```ignore
/// #[derive(Default)]
/// struct Strings;
///
/// #[suite]
/// impl Strings {
///     #[test_case]
///     fn upper(&mut self, t: &mut TestCase<'_>) -> TestResult {
///         t.expect_eq("abc".to_uppercase(), "ABC")
///     }
///
///     #[test_case(tag = "slow")]
///     fn repeat(&mut self, t: &mut TestCase<'_>) -> TestResult {
///         t.check("ab".repeat(3) == "ababab");
///         Ok(())
///     }
/// }
///
/// // Generates:
/// impl otest::TestContainer for Strings {
///     fn run_tests(&mut self, t: &mut otest::TestCase<'_>) {
///         t.run_tagged("upper", "", |t| self.upper(t));
///         t.run_tagged("repeat", "slow", |t| self.repeat(t));
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn suite(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(Span::call_site(), "`#[suite]` takes no arguments")
            .to_compile_error()
            .into();
    }

    let mut input = parse_macro_input!(item as ItemImpl);
    match expand_suite(&mut input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// A method picked up as a sub-test.
struct SubTest {
    ident: syn::Ident,
    tag: String,
}

fn expand_suite(input: &mut ItemImpl) -> syn::Result<TokenStream2> {
    if let Some((_, path, _)) = &input.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "`#[suite]` goes on an inherent impl block, not a trait impl",
        ));
    }

    let mut sub_tests = Vec::new();

    for item in &mut input.items {
        let ImplItem::Fn(method) = item else {
            continue;
        };

        // Strip our marker so the compiler never sees it.
        let mut tag = None;
        let mut kept = Vec::with_capacity(method.attrs.len());
        for attr in method.attrs.drain(..) {
            if attr.path().is_ident("test_case") {
                if tag.is_some() {
                    return Err(syn::Error::new_spanned(&attr, "duplicate `#[test_case]`"));
                }
                tag = Some(parse_tag(&attr)?);
            } else {
                kept.push(attr);
            }
        }
        method.attrs = kept;

        let Some(tag) = tag else {
            continue;
        };

        let sig = &method.sig;
        match sig.inputs.first() {
            Some(FnArg::Receiver(receiver)) if receiver.reference.is_some() => {}
            _ => {
                return Err(syn::Error::new_spanned(
                    sig,
                    "`#[test_case]` methods take `&self` or `&mut self`",
                ));
            }
        }
        if sig.inputs.len() != 2 {
            return Err(syn::Error::new_spanned(
                &sig.inputs,
                "`#[test_case]` methods take exactly one `&mut TestCase<'_>` argument after `self`",
            ));
        }
        if sig.asyncness.is_some() {
            return Err(syn::Error::new_spanned(sig, "`#[test_case]` methods cannot be async"));
        }

        sub_tests.push(SubTest {
            ident: sig.ident.clone(),
            tag,
        });
    }

    let self_ty = &input.self_ty;
    let (impl_generics, _, where_clause) = input.generics.split_for_impl();
    let runs = sub_tests.iter().map(|SubTest { ident, tag }| {
        let name = ident.to_string();
        quote! {
            __otest_case.run_tagged(#name, #tag, |__otest_case| self.#ident(__otest_case));
        }
    });

    Ok(quote! {
        #input

        impl #impl_generics ::otest::TestContainer for #self_ty #where_clause {
            fn run_tests(&mut self, __otest_case: &mut ::otest::TestCase<'_>) {
                #(#runs)*
            }
        }
    })
}

/// `#[test_case]` -> `""`, `#[test_case(tag = "x")]` -> `"x"`.
fn parse_tag(attr: &Attribute) -> syn::Result<String> {
    if let Meta::Path(_) = attr.meta {
        return Ok(String::new());
    }

    let mut tag = String::new();
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("tag") {
            let lit: LitStr = meta.value()?.parse()?;
            tag = lit.value();
            Ok(())
        } else {
            Err(meta.error("unsupported `test_case` argument, expected `tag = \"...\"`"))
        }
    })?;
    Ok(tag)
}
