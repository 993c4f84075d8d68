use proc_macro::TokenStream as TokenStream1;

use proc_macro2::{Span, TokenStream};
use proc_macro_error::{abort, proc_macro_error};
use syn::parse::Parse;
use syn::spanned::Spanned;
use syn::*;
use template_quote::quote;

#[derive(Debug, Default)]
struct Arguments {
    krate: Option<Path>,
}

impl Parse for Arguments {
    fn parse(input: parse::ParseStream) -> Result<Self> {
        let mut ret: Self = Default::default();
        while input.peek(Ident) {
            let ident: Ident = input.parse()?;
            if &ident == "krate" {
                input.parse::<Token![=]>()?;
                ret.krate = Some(input.parse()?);
            } else {
                return Err(Error::new(ident.span(), "Bad option"));
            }
            if input.parse::<Token![,]>().is_err() {
                break;
            }
        }
        if !input.is_empty() {
            Err(Error::new(input.span(), "Unparsed args"))
        } else {
            Ok(ret)
        }
    }
}

// Strips `#[caseful(nested)]` markers, reporting whether one was present.
fn take_nested_marker(attrs: &mut Vec<Attribute>) -> Result<bool> {
    let mut found = false;
    let mut kept = Vec::new();
    for attr in core::mem::take(attrs) {
        if attr.path().is_ident("caseful") {
            let ident: Ident = attr.parse_args()?;
            if ident != "nested" {
                return Err(Error::new(ident.span(), "Require `nested`"));
            }
            found = true;
        } else {
            kept.push(attr);
        }
    }
    *attrs = kept;
    Ok(found)
}

fn binding_ident(i: usize) -> Ident {
    Ident::new(&format!("__caseful_{}", i), Span::call_site())
}

// Probe body shared by enum variants and wrapper structs, emitted with the
// payload bindings already in scope. `tys` holds one type per payload field;
// two or more fields are presented as a single tuple payload.
fn emit_probe_tail(
    krate: &Path,
    label: &str,
    tys: &[Type],
    bindings: &[Ident],
    nested: bool,
) -> TokenStream {
    match tys {
        [ty] => {
            let binding = &bindings[0];
            quote! {
                __caseful_path.push_segment(#label, ::core::any::type_name::<#ty>());
                if let ::core::option::Option::Some(__caseful_hit) =
                    (#binding as &dyn ::core::any::Any).downcast_ref::<__CasefulValue>()
                {
                    return ::core::option::Option::Some(
                        ::core::clone::Clone::clone(__caseful_hit),
                    );
                }
                #(if nested) {
                    <#ty as #krate::CaseAccess>::probe_value::<__CasefulValue>(
                        #binding,
                        __caseful_path,
                    )
                } #(else) {
                    ::core::option::Option::None
                }
            }
        }
        tys => quote! {
            __caseful_path.push_segment(#label, ::core::any::type_name::<(#(#tys),*)>());
            if ::core::any::TypeId::of::<__CasefulValue>()
                == ::core::any::TypeId::of::<(#(#tys),*)>()
            {
                let __caseful_tuple = (
                    #(for binding in bindings), { ::core::clone::Clone::clone(#binding) }
                );
                if let ::core::option::Option::Some(__caseful_hit) =
                    (&__caseful_tuple as &dyn ::core::any::Any)
                        .downcast_ref::<__CasefulValue>()
                {
                    return ::core::option::Option::Some(
                        ::core::clone::Clone::clone(__caseful_hit),
                    );
                }
            }
            ::core::option::Option::None
        },
    }
}

fn impl_generics_for(generics: &Generics, extra: Vec<WherePredicate>) -> Generics {
    let mut generics = generics.clone();
    let params: Vec<Ident> = generics.type_params().map(|tp| tp.ident.clone()).collect();
    let preds = &mut generics.make_where_clause().predicates;
    for ident in params {
        preds.push(parse_quote!(#ident: ::core::fmt::Debug + 'static));
    }
    preds.extend(extra);
    generics
}

fn emit_enum(krate: &Path, item: &mut ItemEnum) -> Result<TokenStream> {
    if item.variants.is_empty() {
        abort!(Span::call_site(), "needs one or more variants");
    }
    let mut preds: Vec<WherePredicate> = Vec::new();
    let mut probe_arms = Vec::new();
    let mut label_arms = Vec::new();
    for variant in item.variants.iter_mut() {
        let nested = take_nested_marker(&mut variant.attrs)?;
        let vid = variant.ident.clone();
        let label = vid.to_string();
        label_arms.push(quote! { Self::#vid { .. } => #label, });
        let tys: Vec<Type> = variant.fields.iter().map(|field| field.ty.clone()).collect();
        if nested && tys.len() != 1 {
            return Err(Error::new(
                variant.span(),
                "Require exactly one payload field for `nested`",
            ));
        }
        for ty in &tys {
            preds.push(parse_quote!(#ty: ::core::any::Any));
            if tys.len() > 1 {
                preds.push(parse_quote!(#ty: ::core::clone::Clone));
            }
        }
        if nested {
            let ty = &tys[0];
            preds.push(parse_quote!(#ty: #krate::CaseAccess));
        }
        if tys.is_empty() {
            probe_arms.push(quote! { Self::#vid => ::core::option::Option::None, });
            continue;
        }
        let bindings: Vec<Ident> = (0..tys.len()).map(binding_ident).collect();
        let tail = emit_probe_tail(krate, &label, &tys, &bindings, nested);
        probe_arms.push(quote! {
            Self::#vid
            #(if let Fields::Named(_) = &variant.fields) {
                { #(for (field, binding) in variant.fields.iter().zip(&bindings)), {
                    #{&field.ident}: #binding
                } }
            }
            #(if let Fields::Unnamed(_) = &variant.fields) {
                ( #(#bindings),* )
            }
            => { #tail }
        });
    }
    let ident = &item.ident;
    let generics = impl_generics_for(&item.generics, preds);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics #krate::CaseAccess for #ident #ty_generics #where_clause {
            fn case_label(&self) -> &'static str {
                match self { #(#label_arms)* }
            }
            #[doc(hidden)]
            fn probe_value<__CasefulValue: ::core::any::Any + ::core::clone::Clone>(
                &self,
                __caseful_path: &mut #krate::CasePath,
            ) -> ::core::option::Option<__CasefulValue> {
                match self { #(#probe_arms)* }
            }
        }
    })
}

fn emit_struct(krate: &Path, item: &mut ItemStruct) -> Result<TokenStream> {
    if item.fields.len() != 1 {
        abort!(item.span(), "needs exactly one payload field");
    }
    let mut preds: Vec<WherePredicate> = Vec::new();
    let field = item.fields.iter_mut().next().unwrap();
    let nested = take_nested_marker(&mut field.attrs)?;
    let ty = field.ty.clone();
    let (label, member) = match &field.ident {
        Some(ident) => (ident.to_string(), Member::Named(ident.clone())),
        None => ("0".to_string(), Member::Unnamed(Index::from(0))),
    };
    preds.push(parse_quote!(#ty: ::core::any::Any));
    if nested {
        preds.push(parse_quote!(#ty: #krate::CaseAccess));
    }
    let binding = binding_ident(0);
    let tail = emit_probe_tail(krate, &label, &[ty], &[binding.clone()], nested);
    let ident = &item.ident;
    let generics = impl_generics_for(&item.generics, preds);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics #krate::CaseAccess for #ident #ty_generics #where_clause {
            fn case_label(&self) -> &'static str {
                #label
            }
            #[doc(hidden)]
            fn probe_value<__CasefulValue: ::core::any::Any + ::core::clone::Clone>(
                &self,
                __caseful_path: &mut #krate::CasePath,
            ) -> ::core::option::Option<__CasefulValue> {
                let #binding = &self.#member;
                #tail
            }
        }
    })
}

fn inner(arg: Arguments, input: Item) -> TokenStream {
    let krate = arg.krate.unwrap_or(parse_quote!(::caseful));
    match input {
        Item::Enum(mut item) => {
            let impls = emit_enum(&krate, &mut item).unwrap_or_else(|e| abort!(e.span(), "{}", e));
            quote! { #item #impls }
        }
        Item::Struct(mut item) => {
            let impls =
                emit_struct(&krate, &mut item).unwrap_or_else(|e| abort!(e.span(), "{}", e));
            quote! { #item #impls }
        }
        input => abort!(input.span(), "Bad item"),
    }
}

#[proc_macro_error]
#[proc_macro_attribute]
pub fn caseful(attr: TokenStream1, input: TokenStream1) -> TokenStream1 {
    inner(
        parse(attr).unwrap_or_else(|e| abort!(e.span(), "{}", e)),
        parse_macro_input!(input as Item),
    )
    .into()
}
