use cref_core::doc_tree::DocTree;
use cref_core::{escape_markdown, CrefFormatter, FormatOptions};

fn main() {
    let docs = DocTree::new().with_type("Library.With.Dot.Pair`2", ["TKey", "TValue"]);
    let options = FormatOptions {
        url_base: "https://docs.example.com/".to_string(),
        ..FormatOptions::default()
    };
    let formatter = CrefFormatter::new(options).with_source(&docs);

    for cref in [
        "N:Library.With.Dot",
        "T:Library.With.Dot.Pair`2",
        "M:Library.With.Dot.Pair`2.Swap(`0@,`1@)",
        "! Could not resolve 'Frobnicate'",
    ] {
        let label = escape_markdown(&formatter.signature(cref));
        match formatter.url(cref) {
            Some(url) => println!("[{label}]({url})"),
            None => println!("{label}"),
        }
    }
}
