//! Hierarchical addressing: a site machine invokes a blog-page child while
//! its `blog` state is active. A navigation component that was created
//! independently resolves the child by id and drives it to a post.

use serde_json::{json, Value};
use statewire::binding::{bind, dispatch, View};
use statewire::{
    Actor, Context, Event, MachineBuilder, RegistryHandle, Snapshot, StateBuilder, Transition,
};
use std::sync::Arc;

struct PageView;

impl View for PageView {
    fn render(&self, snapshot: &Snapshot) {
        match snapshot.value.as_str() {
            "index" => println!("[page] all posts"),
            "post" => println!("[page] post {:?}", snapshot.context.get("postID")),
            other => println!("[page] {other}"),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let blog_page = Arc::new(
        MachineBuilder::new("blog-page")
            .initial("index")
            .state(
                "index",
                StateBuilder::new().on(
                    "post",
                    Transition::to("post").assign(|_, event| {
                        Context::patch([(
                            "postID",
                            event.get("postID").cloned().unwrap_or(Value::Null),
                        )])
                    }),
                ),
            )
            .state(
                "post",
                StateBuilder::new().on("back", Transition::to("index")),
            )
            .build()?,
    );

    let site = Arc::new(
        MachineBuilder::new("site")
            .initial("blog")
            .state("blog", StateBuilder::new().invoke("blog-page", blog_page))
            .build()?,
    );

    let registry = RegistryHandle::new();
    let root = Actor::new(site, &registry);
    root.start()?;

    // The child spawned on entry to `blog` is already resolvable.
    let page = registry.must_lookup("blog-page")?;
    bind(&page, PageView)?;

    // The navigation component addresses the page purely by id.
    dispatch(
        &registry,
        "blog-page",
        Event::new("post").with("postID", json!("42")),
    )?;
    dispatch(&registry, "blog-page", Event::new("back"))?;

    root.stop();
    Ok(())
}
