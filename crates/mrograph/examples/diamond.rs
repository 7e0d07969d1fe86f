//! Diamond inheritance with cooperative dispatch
//!
//! This example demonstrates:
//! - Declaring A; B(A); C(A); D(B, C), each overriding `hello`
//! - Calling `D.hello`, where every override forwards to the next one
//! - Printing the MRO of D

use mrograph::{ClassGraph, ClassId, CooperativeChain, Hierarchy};

fn hello(hierarchy: &Hierarchy, chain: &mut CooperativeChain<'_>) -> mrograph::Result<()> {
    let Some(current) = chain.current() else {
        return Ok(());
    };
    println!("{}.hello", hierarchy.get_class(current)?.name);

    // super().hello(); the root implementation has nothing left to call.
    match chain.forward() {
        Ok(_) => hello(hierarchy, chain),
        Err(e) if e.is_lookup_miss() => Ok(()),
        Err(e) => Err(e),
    }
}

fn main() -> mrograph::Result<()> {
    let mut graph = ClassGraph::with_root("object", ["__init__", "__repr__"])?;
    let a = graph.declare("A", &[], ["hello"])?;
    let b = graph.declare("B", &[a], ["hello"])?;
    let c = graph.declare("C", &[a], ["hello"])?;
    let d: ClassId = graph.declare("D", &[b, c], ["hello"])?;

    let hierarchy = graph.finalize()?;

    let mut chain = hierarchy.resolver().chain(d, "hello")?;
    hello(&hierarchy, &mut chain)?;

    println!("\nMRO for D:");
    for name in hierarchy.mro_names(d)? {
        println!(" - {name}");
    }

    Ok(())
}
