use std::{cell::RefCell, collections::HashMap, rc::Rc};

use filedesk_runtime::{
    ActivationBus, AppConfig, MemoryRouterView, NavigationTrigger, Router, RouterPhase,
};
use futures::{
    channel::oneshot,
    executor::LocalPool,
    task::LocalSpawnExt,
};
use platform_host::{FetchError, FragmentFuture, FragmentSource};
use pretty_assertions::assert_eq;

/// Fragment source whose responses are released by the test, in any order.
#[derive(Clone, Default)]
struct GatedSource {
    pending: Rc<RefCell<HashMap<String, oneshot::Sender<Result<String, FetchError>>>>>,
}

impl GatedSource {
    fn release(&self, url: &str, result: Result<String, FetchError>) {
        let sender = self
            .pending
            .borrow_mut()
            .remove(url)
            .expect("fetch should be pending");
        sender.send(result).expect("router still waiting");
    }
}

impl FragmentSource for GatedSource {
    fn fetch_fragment<'a>(
        &'a self,
        url: &'a str,
    ) -> FragmentFuture<'a, Result<String, FetchError>> {
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().insert(url.to_string(), tx);
        Box::pin(async move {
            rx.await
                .unwrap_or_else(|_| Err(FetchError::Network("cancelled".to_string())))
        })
    }
}

struct Harness {
    pool: LocalPool,
    router: Router,
    view: MemoryRouterView,
    source: GatedSource,
    activations: Rc<RefCell<Vec<String>>>,
}

fn harness() -> Harness {
    let source = GatedSource::default();
    let view = MemoryRouterView::default();
    let bus = ActivationBus::default();
    let activations = Rc::new(RefCell::new(Vec::new()));
    let sink = activations.clone();
    std::mem::forget(bus.subscribe(move |event| {
        sink.borrow_mut().push(event.page.as_str().to_string());
    }));
    let router = Router::new(
        AppConfig::default().route_table(),
        Rc::new(source.clone()),
        Rc::new(view.clone()),
        bus,
    );
    Harness {
        pool: LocalPool::new(),
        router,
        view,
        source,
        activations,
    }
}

impl Harness {
    fn navigate(&self, page: &'static str) {
        let router = self.router.clone();
        self.pool
            .spawner()
            .spawn_local(async move { router.navigate(page, NavigationTrigger::Link).await })
            .expect("spawn navigation");
    }
}

#[test]
fn later_navigation_wins_when_its_fetch_resolves_first() {
    let mut h = harness();
    h.navigate("myfile");
    h.navigate("stats");
    h.pool.run_until_stalled();

    h.source
        .release("/pages/stats.html", Ok("<section>stats</section>".to_string()));
    h.pool.run_until_stalled();
    h.source
        .release("/pages/myfile.html", Ok("<section>files</section>".to_string()));
    h.pool.run_until_stalled();

    assert_eq!(h.view.content().as_deref(), Some("<section>stats</section>"));
    assert_eq!(h.view.highlighted().as_deref(), Some("stats"));
    assert_eq!(*h.activations.borrow(), vec!["stats"]);
}

#[test]
fn later_navigation_wins_when_the_earlier_fetch_resolves_last() {
    let mut h = harness();
    h.navigate("myfile");
    h.navigate("stats");
    h.pool.run_until_stalled();

    h.source
        .release("/pages/myfile.html", Ok("<section>files</section>".to_string()));
    h.pool.run_until_stalled();
    assert_eq!(h.view.content(), None);

    h.source
        .release("/pages/stats.html", Ok("<section>stats</section>".to_string()));
    h.pool.run_until_stalled();

    assert_eq!(h.view.content().as_deref(), Some("<section>stats</section>"));
    assert_eq!(h.view.hash().as_deref(), Some("stats"));
    assert_eq!(*h.activations.borrow(), vec!["stats"]);
    assert_eq!(
        h.router.state().phase,
        RouterPhase::Active("stats".into())
    );
}

#[test]
fn stale_failure_does_not_replace_a_rendered_page() {
    let mut h = harness();
    h.navigate("myfile");
    h.navigate("upload");
    h.pool.run_until_stalled();

    h.source
        .release("/pages/upload.html", Ok("<section>upload</section>".to_string()));
    h.source
        .release("/pages/myfile.html", Err(FetchError::Status(500)));
    h.pool.run_until_stalled();

    assert_eq!(h.view.content().as_deref(), Some("<section>upload</section>"));
    assert_eq!(*h.activations.borrow(), vec!["upload"]);
}

#[test]
fn unknown_page_never_touches_the_hash_or_activates() {
    let mut h = harness();
    h.navigate("nowhere");
    h.pool.run_until_stalled();

    assert_eq!(h.view.content().as_deref(), Some("404 - Page not found"));
    assert_eq!(h.view.hash(), None);
    assert!(h.activations.borrow().is_empty());
}
