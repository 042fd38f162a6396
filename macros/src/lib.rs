//! `#[rxmono_macro::test]`: one attribute for sync tests, tokio-driven async
//! tests and `wasm_bindgen_test` on wasm32.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, spanned::Spanned, Ident, ItemFn, LitStr};

const USAGE: &str = "rxmono_macro::test accepts no argument, `current_thread` or `multi_thread`";

#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
  let input = parse_macro_input!(item as ItemFn);
  let is_async = input.sig.asyncness.is_some();
  let raw_args = proc_macro2::TokenStream::from(attr);

  let tokio_args = if raw_args.is_empty() {
    proc_macro2::TokenStream::new()
  } else if !is_async {
    return syn::Error::new(
      raw_args.span(),
      "rxmono_macro::test runtime flavors only apply to async tests",
    )
    .to_compile_error()
    .into();
  } else {
    match flavor(raw_args) {
      Ok(flavor) => quote!(flavor = #flavor),
      Err(err) => return err.to_compile_error().into(),
    }
  };

  let wasm_attr = if is_async {
    quote!(wasm_bindgen_test::wasm_bindgen_test(async))
  } else {
    quote!(wasm_bindgen_test::wasm_bindgen_test)
  };
  let native_attr = if is_async { quote!(tokio::test(#tokio_args)) } else { quote!(test) };

  quote! {
      #[cfg_attr(target_arch = "wasm32", #wasm_attr)]
      #[cfg_attr(not(target_arch = "wasm32"), #native_attr)]
      #input
  }
  .into()
}

/// Accepts the flavor either as an identifier or as a string literal.
fn flavor(args: proc_macro2::TokenStream) -> syn::Result<&'static str> {
  let (name, span) = if let Ok(ident) = syn::parse2::<Ident>(args.clone()) {
    (ident.to_string(), ident.span())
  } else if let Ok(lit) = syn::parse2::<LitStr>(args.clone()) {
    (lit.value(), lit.span())
  } else {
    return Err(syn::Error::new(args.span(), USAGE));
  };

  match name.as_str() {
    "current_thread" => Ok("current_thread"),
    "multi_thread" => Ok("multi_thread"),
    _ => Err(syn::Error::new(span, USAGE)),
  }
}
