/*
 * Copyright © 2024, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use std::fmt::{Write,Debug};

/// a simple standalone writer that produces JavaScript object literals from (nested) closures.
/// In contrast to JSON this supports unquoted property names, function valued properties and
/// arbitrary JS expressions as values. Use like so:
/// ```
///     use tif2js_common::js_writer::JsWriter;
///     let mut w = JsWriter::new();
///     w.write_const_decl( "data", |w|{
///         w.write_field( "width", 42);
///         w.write_array_field( "tl", |w|{
///             w.write_value(0.5);
///             w.write_value(1.5);
///         });
///         w.write_fn_field( "twice", "x", "return 2*x;");
///     });
///     assert!( w.as_str().starts_with("const data = {\nwidth: 42,"));
/// ```
pub struct JsWriter {
    buf: String,
    depth: usize,
}

impl JsWriter {
    pub fn new()->Self { 
        JsWriter { buf: String::new(), depth: 0 } 
    }

    pub fn with_capacity (len: usize)->Self { 
        JsWriter { buf: String::with_capacity(len), depth: 0 } 
    }

    /// `const <name> = {..};` with one top level field per line
    pub fn write_const_decl (&mut self, var_name: &str, f: impl FnOnce(&mut JsWriter)) {
        write!( self.buf, "const {var_name} = ");
        self.write_object(f);
        self.buf.push_str(";\n");
    }

    pub fn write_object (&mut self, f: impl FnOnce(&mut JsWriter)) { 
        self.check_separator();
        self.buf.push('{');
        self.depth += 1;
        f (self);
        self.depth -= 1;
        if self.depth == 0 { self.buf.push('\n') }
        self.buf.push('}');
    }

    pub fn write_object_field (&mut self, prop_name: &str, f: impl FnOnce(&mut JsWriter)) { 
        self.write_prop_name( prop_name);
        self.buf.push('{');
        self.depth += 1;
        f (self);
        self.depth -= 1;
        self.buf.push('}');
    }

    pub fn write_array (&mut self, f: impl FnOnce(&mut JsWriter)) {
        self.check_separator();
        self.buf.push('[');
        f (self);
        self.buf.push(']');
    }

    pub fn write_array_field (&mut self, prop_name: &str, f: impl FnOnce(&mut JsWriter)) { 
        self.write_prop_name( prop_name);
        self.buf.push('[');
        f (self);
        self.buf.push(']');
    }

    /// catch-all for numbers and other values that have a JS compatible Debug format
    pub fn write_field<T:Debug> (&mut self, prop_name: &str, value: T) {
        self.write_prop_name( prop_name);
        write!( self.buf, "{:?}", value);
    }

    pub fn write_str_field (&mut self, prop_name: &str, value: &str) {
        self.write_prop_name( prop_name);
        write_js_string( &mut self.buf, value);
    }

    /// the value is a JS expression that is written verbatim
    pub fn write_expr_field (&mut self, prop_name: &str, expr: &str) {
        self.write_prop_name( prop_name);
        self.buf.push_str( expr);
    }

    pub fn write_fn_field (&mut self, prop_name: &str, params: &str, body: &str) {
        self.write_prop_name( prop_name);
        write!( self.buf, "function({params}) {{ {body} }}");
    }

    pub fn write_value<T:Debug> (&mut self, value: T) {
        self.check_separator();
        write!( self.buf, "{value:?}");
    }

    /// write a sequence of integers as a JS array without going through per element closures
    pub fn write_int_array (&mut self, values: impl IntoIterator<Item=i64>) {
        self.check_separator();
        self.buf.push('[');
        let mut first = true;
        for v in values {
            if !first { self.buf.push(',') }
            write!( self.buf, "{v}");
            first = false;
        }
        self.buf.push(']');
    }

    pub fn to_string(self)->String { self.buf }
    
    pub fn as_str (&self)->&str { self.buf.as_str() }

    pub fn len (&self)->usize {
        self.buf.len()
    }

    pub fn is_empty (&self)->bool {
        self.buf.is_empty()
    }

    fn write_prop_name (&mut self, prop_name: &str) {
        self.check_separator();
        if self.depth == 1 { self.buf.push('\n') }
        if is_js_identifier( prop_name) || prop_name.bytes().all(|b| b.is_ascii_digit()) {
            self.buf.push_str( prop_name);
        } else {
            write_js_string( &mut self.buf, prop_name);
        }
        self.buf.push_str(": ");
    }

    #[inline] fn check_separator (&mut self) {
        if let Some(b) = self.buf.as_bytes().last() {
            if *b != b'{' && *b != b'[' && *b != b',' && *b != b' ' && *b != b'\n' {
                self.buf.push(',');
            }
        }
    }
}

impl From<JsWriter> for String {
    fn from(w: JsWriter)->String { w.buf }
}

pub fn write_js_string (buf: &mut String, s: &str) {
    buf.push('"');
    for c in s.chars() {
        match c {
            '"' => buf.push_str("\\\""),
            '\\' => buf.push_str("\\\\"),
            '\n' => buf.push_str("\\n"),
            '\r' => buf.push_str("\\r"),
            '\t' => buf.push_str("\\t"),
            '\u{2028}' => buf.push_str("\\u2028"),
            '\u{2029}' => buf.push_str("\\u2029"),
            c if c.is_control() => { write!( buf, "\\u{:04x}", c as u32); }
            c => buf.push(c)
        }
    }
    buf.push('"');
}

const JS_RESERVED: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import", "in",
    "instanceof", "let", "new", "null", "return", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with", "yield", "await", "static", "implements", "interface",
    "package", "private", "protected", "public"
];

/// answer if s can be used as a JavaScript variable name (ASCII subset)
pub fn is_js_identifier (s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all( |c| c.is_ascii_alphanumeric() || c == '_' || c == '$') && !JS_RESERVED.contains(&s)
        }
        _ => false
    }
}
