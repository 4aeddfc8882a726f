use darling::FromDeriveInput;
use proc_macro::TokenStream;
use quote::quote;
use vertex::Vertex;

mod vertex;

#[proc_macro_derive(Vertex, attributes(vertex))]
pub fn vertex_derive(input: TokenStream) -> TokenStream {
    let input = match syn::parse::<syn::DeriveInput>(input) {
        Ok(input) => input,
        Err(e) => return e.to_compile_error().into(),
    };

    match Vertex::from_derive_input(&input) {
        Ok(vertex) => quote!(#vertex).into(),
        Err(e) => e.write_errors().into(),
    }
}
