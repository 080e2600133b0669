use std::sync::Arc;

use serde_json::json;
use serial_test::serial;
use styleq::{styles, Descriptor, InlineStyle, Style, StyleCache, Styleq};
use styleq_localize::{localize, localized_options, DirectionCell, Localizer};

fn fixture() -> Descriptor {
    Style::from_json(&json!({
        "$$css": true,
        "$$css$localize": true,
        "marginStart": ["margin-left-0px", "margin-right-0px"],
        "marginEnd": ["margin-right-10px", "margin-left-10px"]
    }))
    .expect("fixture should be a valid style")
}

fn opacity() -> Descriptor {
    Style::from_json(&json!({ "opacity": 1 })).expect("fixture should be a valid style")
}

#[test]
#[serial]
fn test_supports_style_transforms() {
    let direction = DirectionCell::new(false);
    let resolver = Styleq::factory(localized_options(direction.clone()));
    let style = fixture();
    let inline = opacity();
    let expected: InlineStyle = [("opacity", 1)].into_iter().collect();

    let ltr = resolver.resolve(&styles![&style, &inline]);
    assert_eq!(ltr.class_name, "margin-left-0px margin-right-10px");
    assert_eq!(ltr.inline_style.as_ref(), Some(&expected));

    direction.set_rtl(true);
    let rtl = resolver.resolve(&styles![&style, &inline]);
    assert_eq!(rtl.class_name, "margin-right-0px margin-left-10px");
    assert_eq!(rtl.inline_style.as_ref(), Some(&expected));
}

#[test]
fn test_memoizes_results() {
    let style = fixture();
    let first = localize(&style, false);
    let second = localize(&style, false);
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_unflagged_styles_pass_through() {
    let plain = Style::from_json(&json!({ "$$css": true, "color": "color-red" })).unwrap();
    let dynamic = opacity();

    assert!(Arc::ptr_eq(&localize(&plain, true), &plain));
    assert!(Arc::ptr_eq(&localize(&dynamic, true), &dynamic));
}

#[test]
fn test_injected_localizer_keeps_resolver_cache_warm() {
    let localizer = Arc::new(Localizer::new());
    let direction = DirectionCell::new(true);
    let cache = StyleCache::new();
    let resolver = Styleq::factory(localizer.options(direction.clone()).cache(cache.clone()));
    let style = fixture();

    let first = resolver.resolve(&styles![&style]);
    let second = resolver.resolve(&styles![&style]);
    assert_eq!(first, second);
    assert_eq!(first.class_name, "margin-right-0px margin-left-10px");

    // One cache entry, keyed by the memoized RTL output.
    assert_eq!(cache.len(), 1);
    let compiled = localizer.localize(&style, true);
    assert!(cache.root().get(&compiled).is_some());

    direction.set_rtl(false);
    let ltr = resolver.resolve(&styles![&style]);
    assert_eq!(ltr.class_name, "margin-left-0px margin-right-10px");
    assert_eq!(cache.len(), 2);
    assert_eq!(localizer.len(), 1);
}
