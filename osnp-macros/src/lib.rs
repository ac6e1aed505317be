use proc_macro::TokenStream;
use quote::{format_ident, quote, ToTokens};
use syn::{parse_macro_input, Attribute, ItemStruct};

/// Generate a zero-copy reader/writer for a fixed-layout wire structure.
///
/// Every field of the annotated struct becomes a getter (and a `set_` method
/// when the buffer is mutable). Fields are laid out in declaration order:
///
/// - `u8` and `u32` take 1 and 4 octets, `u32` is little-endian.
/// - `&[u8]` takes `#[bytes(n)]` octets.
#[proc_macro_attribute]
pub fn frame(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);

    let item_attr = input.attrs;
    let vis = input.vis;
    let name = input.ident;

    let mut getters = vec![];
    let mut setters = vec![];

    let mut offset: usize = 0;

    for field in input.fields {
        let fnname = field.ident.expect("#[frame] requires named fields");
        let ty = field.ty.to_token_stream().to_string();

        let docs: Vec<&Attribute> = field
            .attrs
            .iter()
            .filter(|attr| attr.path().is_ident("doc"))
            .collect();

        let bytes = find_attr(&field.attrs, "bytes").map(parse_usize);

        let (size, getter, setter, return_type) = match ty.as_str() {
            "u8" => (
                1,
                quote! { self.buffer.as_ref()[#offset] },
                quote! { self.buffer.as_mut()[#offset] = value; },
                quote! { u8 },
            ),
            "u32" => (
                4,
                quote! {
                    let b = &self.buffer.as_ref()[#offset..][..4];
                    u32::from_le_bytes([b[0], b[1], b[2], b[3]])
                },
                quote! {
                    self.buffer.as_mut()[#offset..][..4].copy_from_slice(&value.to_le_bytes());
                },
                quote! { u32 },
            ),
            "& [u8]" => match bytes {
                Some(n) if n > 0 => (
                    n,
                    quote! { &self.buffer.as_ref()[#offset..][..#n] },
                    quote! {
                        self.buffer.as_mut()[#offset..][..#n].copy_from_slice(value);
                    },
                    quote! { &[u8] },
                ),
                _ => panic!("`{fnname}` needs a #[bytes(n)] attribute with n > 0"),
            },
            other => panic!("#[frame] does not support fields of type `{other}`"),
        };

        offset += size;

        getters.push(quote! {
            #(#docs)*
            pub fn #fnname(&self) -> #return_type {
                #getter
            }
        });

        let setter_name = format_ident!("set_{}", fnname);
        let setter_doc = format!("Set the `{fnname}` field.");
        setters.push(quote! {
            #[doc = #setter_doc]
            pub fn #setter_name(&mut self, value: #return_type) {
                #setter
            }
        });
    }

    let size = offset;

    quote! {
        #(#item_attr)*
        #vis struct #name<T: AsRef<[u8]>> {
            buffer: T,
        }

        impl<T: AsRef<[u8]>> #name<T> {
            /// Create a new reader/writer without checking the buffer length.
            pub fn new(buffer: T) -> Self {
                Self { buffer }
            }

            /// Returns `false` if the buffer is too short for this structure.
            pub fn check_len(&self) -> bool {
                self.buffer.as_ref().len() >= Self::size()
            }

            /// Return the underlying buffer.
            pub fn into_inner(self) -> T {
                self.buffer
            }

            /// Returns the size of this structure in octets.
            pub const fn size() -> usize {
                #size
            }

            #(#getters)*
        }

        impl<T: AsRef<[u8]> + AsMut<[u8]>> #name<T> {
            #(#setters)*
        }
    }
    .into()
}

fn find_attr<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| attr.path().is_ident(name))
}

fn parse_usize(attr: &Attribute) -> usize {
    attr.parse_args::<syn::LitInt>()
        .unwrap()
        .base10_parse::<usize>()
        .unwrap()
}
