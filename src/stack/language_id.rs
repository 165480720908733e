crate::define_id_enum! {
    /// Ecosystem that governs a build context
    LanguageId {
        Go => "go",
        Rust => "rust",
        Node => "node",
        Python => "python",
        Java => "java",
        /// Pseudo-language of synthetic chart matrix entries
        Helm => "helm",
    }
}
