mod df;
use pyo3::{prelude::*, py_run};

macro_rules! register_submodule {
    ($parent:expr, $hierarchy:expr) => {{
        let py = $parent.py();
        let module_name = $hierarchy
            .rsplit_once('.')
            .map_or($hierarchy, |(_, name)| name);
        let submodule = PyModule::new_bound(py, module_name)?;
        py_run!(
            py,
            submodule,
            concat!("import sys; sys.modules['", $hierarchy, "'] = submodule")
        );
        $parent.add_submodule(&submodule)?;
        submodule
    }};
}

#[pymodule]
fn fastdf(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    let rs_module = register_submodule!(m, "fastdf._rs");
    let df_module = register_submodule!(rs_module, "fastdf._rs.df");
    df_module.add_class::<df::FastDataFrame>()?;
    df_module.add_class::<df::FastDataFrameView>()?;
    df_module.add_class::<df::FastRow>()?;
    df_module.add_class::<df::LocIndexer>()?;

    m.add_class::<df::FastDataFrame>()?;

    Ok(())
}
