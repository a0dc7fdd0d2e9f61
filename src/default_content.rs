// ABOUTME: Built-in document for the lazy-slides application
// ABOUTME: Shown when no Markdown file is given on the command line

pub const DEFAULT_DOCUMENT: &str = r#"text before the first title is ignored...

# Lazy Speaker Slides

With **Lazy Speaker Slides** you can write presentations _in seconds_.

Forget the style, focus on the content! :)

Every H1 is a different slide.

# Features

* **Markdown** support, thanks to [comrak](https://github.com/kivikakk/comrak)
* Various color schemes
* Real time preview

# Code snippets

Code can be inline `rm -r mydir`, or block:

```
PATH='/home/user/code'
cd $PATH
mkdir foo
```

# Keys definitions

* `spacebar` show/hide editor
* `arrow keys` next/previous slide
* `h` show/hide keyboard shortcuts help
* `t` cycle through themes
* `p` toggle between expose/presentation mode

"#;
