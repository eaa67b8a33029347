//! Emit logic for image elements.
//!
//! Images are rasterized ahead of time by the async pre-pass in
//! [`crate::render::resolve`]; here we only look the fragment up by
//! element id.

use super::EmitContext;
use super::types::{ElementBase, ImageElement};
use crate::ir::Op;

impl ImageElement {
    /// Emit IR ops for this image element.
    ///
    /// A cache miss prints nothing and leaves a comment in the document.
    pub fn emit(&self, base: &ElementBase, ctx: &mut EmitContext) {
        let p = ctx.place(base);

        if self.src.is_empty() {
            ctx.push(Op::Comment(format!("image {} has no source", base.id)));
            return;
        }

        match ctx.image_cache.get(&base.id) {
            Some(fragment) if !fragment.is_empty() => {
                tracing::debug!(id = %base.id, bytes = fragment.len(), "image cache hit");
                ctx.push(Op::GraphicField {
                    x: p.x,
                    y: p.y,
                    fragment: fragment.clone(),
                });
            }
            _ => {
                tracing::debug!(id = %base.id, "image not in cache");
                ctx.push(Op::Comment(format!(
                    "image {} failed to load or was not cached",
                    base.id
                )));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::CompileOptions;
    use super::*;
    use std::collections::HashMap;

    fn image(src: &str) -> ImageElement {
        ImageElement {
            src: src.into(),
            alt: None,
        }
    }

    #[test]
    fn test_cache_hit() {
        let mut cache = HashMap::new();
        cache.insert("logo".to_string(), "0,2,1,2,80c0".to_string());
        let options = CompileOptions::default().with_image_cache(cache);
        let mut ctx = EmitContext::new(203, &options);

        let base = ElementBase::new("logo", 5.0, 5.0, 1.0, 0.25);
        image("logo.png").emit(&base, &mut ctx);
        assert_eq!(ctx.ops[0].to_zpl(), "^FO40,40^GFA,0,2,1,2,80c0^FS");
    }

    #[test]
    fn test_cache_miss_is_comment() {
        let options = CompileOptions::default();
        let mut ctx = EmitContext::new(203, &options);
        let base = ElementBase::new("logo", 0.0, 0.0, 10.0, 10.0);
        image("https://example.com/x.png").emit(&base, &mut ctx);
        assert_eq!(
            ctx.ops[0].to_zpl(),
            "^FXimage logo failed to load or was not cached^FS"
        );
    }

    #[test]
    fn test_no_source_is_comment() {
        let mut cache = HashMap::new();
        cache.insert("logo".to_string(), "0,1,1,1,ff".to_string());
        let options = CompileOptions::default().with_image_cache(cache);
        let mut ctx = EmitContext::new(203, &options);
        let base = ElementBase::new("logo", 0.0, 0.0, 10.0, 10.0);
        image("").emit(&base, &mut ctx);
        assert!(matches!(&ctx.ops[0], Op::Comment(c) if c.contains("no source")));
    }
}
