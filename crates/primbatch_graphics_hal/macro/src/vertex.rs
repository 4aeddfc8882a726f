use darling::{ast, util, FromDeriveInput, FromField};
use quote::{quote, ToTokens};

#[derive(Debug, FromField)]
#[darling(attributes(vertex))]
struct VertexField {
    ident: Option<syn::Ident>,
    ty: syn::Type,

    /// Overrides the attribute location, which otherwise follows field order.
    #[darling(default)]
    location: Option<u32>,
    #[darling(default)]
    ignore: bool,
}

#[derive(Debug, FromDeriveInput)]
#[darling(supports(struct_named))]
pub struct Vertex {
    ident: syn::Ident,
    generics: syn::Generics,
    data: ast::Data<util::Ignored, VertexField>,
}

impl ToTokens for Vertex {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        let Vertex {
            ref ident,
            ref generics,
            ref data,
        } = *self;

        let (imp, ty, wher) = generics.split_for_impl();

        let fields = match data.as_ref().take_struct() {
            Some(fields) => fields.fields,
            None => return,
        };

        let attributes = fields
            .iter()
            .filter(|field| !field.ignore)
            // Padding fields have names starting with __, they are never bound
            .filter(|field| match &field.ident {
                Some(ident) => !ident.to_string().starts_with("__"),
                None => false,
            })
            .enumerate()
            .filter_map(|(position, field)| {
                let field_ident = field.ident.as_ref()?;
                let field_ty = &field.ty;
                let location = field.location.unwrap_or(position as u32);

                // Const block, so the offset is folded into a usize during compilation
                let offset = quote! {
                    {
                        let uninit = core::mem::MaybeUninit::<#ident>::uninit();
                        let uninit_ptr = uninit.as_ptr();
                        let field_ptr = unsafe { core::ptr::addr_of!((*uninit_ptr).#field_ident) };

                        unsafe { (field_ptr as *const u8).offset_from(uninit_ptr as *const u8) as usize }
                    }
                };

                Some(quote! {
                    primbatch_graphics_hal::vertex_buffer::VertexAttribute {
                        location: #location,
                        offset: #offset,
                        kind: <#field_ty as primbatch_graphics_hal::vertex_buffer::AsAttributeKind>::KIND,
                        size: <#field_ty as primbatch_graphics_hal::vertex_buffer::AsAttributeKind>::SIZE
                    }
                })
            });

        tokens.extend(quote! {
            impl #imp primbatch_graphics_hal::vertex_buffer::Vertex for #ident #ty #wher {
                const FORMAT: &'static [primbatch_graphics_hal::vertex_buffer::VertexAttribute] = &[
                    #(#attributes,)*
                ];
            }
        });
    }
}
