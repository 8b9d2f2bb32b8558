use codeq_core::analysis::{compute_metrics, sanitize};
use codeq_core::{CodeAnalyzer, Language};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

const JAVASCRIPT: &str = r#"// Fetch and render a list of users
function loadUsers(api, container) {
  const url = `${api}/users?limit=50`;
  return fetch(url)
    .then((res) => res.json())
    .then((users) => {
      for (const user of users) {
        if (user.active && user.email) {
          container.append(render(user));
        } else if (user.pending) {
          console.log("pending", user.id);
        }
      }
    })
    .catch((err) => { /* ignore */ });
}
"#;

const PYTHON: &str = r#"class Inventory:
    """Track items and their quantities."""

    def __init__(self):
        self.items = {}

    def add(self, name, qty=1):
        if qty <= 0:
            raise ValueError("qty must be positive")
        self.items[name] = self.items.get(name, 0) + qty

    def remove(self, name):
        # missing items are ignored
        if name in self.items:
            del self.items[name]
"#;

pub fn criterion_benchmark(c: &mut Criterion) {
    let large = JAVASCRIPT.repeat(40);
    let heuristic = CodeAnalyzer::heuristic_only();
    let precise = CodeAnalyzer::new();

    c.bench_function("sanitize javascript", |b| {
        b.iter(|| sanitize(black_box(&large), black_box(Language::JavaScript)))
    });

    c.bench_function("metrics javascript", |b| {
        b.iter(|| compute_metrics(black_box(&large)))
    });

    c.bench_function("analyze python heuristic", |b| {
        b.iter(|| heuristic.analyze(black_box(PYTHON), black_box(Language::Python)))
    });

    c.bench_function("analyze javascript with parser", |b| {
        b.iter(|| precise.analyze(black_box(JAVASCRIPT), black_box(Language::JavaScript)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
